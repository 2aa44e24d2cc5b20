//! One-line summaries of API records for terminal output

use colored::Colorize;
use sejour_core::{BookingStatus, EntityId, StatusTone, VerificationStatus};
use sejour_model::{
    Amenity, Booking, Dwelling, Hotel, Lounge, MenuItem, OwnerVerification, PageMeta, Residence,
    Restaurant, Room, User,
};

/// A record printable as one row of `list` output
pub trait ListLine {
    fn id_label(&self) -> String;
    fn summary(&self) -> String;
}

fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("-")
}

impl ListLine for Hotel {
    fn id_label(&self) -> String {
        self.id.to_string()
    }

    fn summary(&self) -> String {
        format!("{} ({}★) {}", self.name, self.stars, or_dash(Some(&self.location.city)))
    }
}

impl ListLine for Room {
    fn id_label(&self) -> String {
        self.id.to_string()
    }

    fn summary(&self) -> String {
        format!(
            "{} [{}] {} / night, {} guests{}",
            self.name,
            self.room_type.display_name(),
            self.price,
            self.capacity,
            if self.is_available { "" } else { ", unavailable" }
        )
    }
}

impl ListLine for Residence {
    fn id_label(&self) -> String {
        self.id.to_string()
    }

    fn summary(&self) -> String {
        format!(
            "{} [{}, {}] {}",
            self.name,
            self.residence_type.display_name(),
            self.standing.display_name(),
            or_dash(Some(&self.location.city))
        )
    }
}

impl ListLine for Dwelling {
    fn id_label(&self) -> String {
        self.id.to_string()
    }

    fn summary(&self) -> String {
        format!(
            "{} [{}] {} / night{}",
            self.name,
            self.structure_type.display_name(),
            self.price,
            if self.is_available { "" } else { ", unavailable" }
        )
    }
}

impl ListLine for Restaurant {
    fn id_label(&self) -> String {
        self.id.to_string()
    }

    fn summary(&self) -> String {
        format!("{} ({}) {}", self.name, or_dash(self.cuisine.as_deref()), self.location.city)
    }
}

impl ListLine for MenuItem {
    fn id_label(&self) -> String {
        self.id.to_string()
    }

    fn summary(&self) -> String {
        let category = self.category.as_ref().map(|c| c.name.as_str());
        format!("{} [{}] {}", self.name, or_dash(category), self.price)
    }
}

impl ListLine for Lounge {
    fn id_label(&self) -> String {
        self.id.to_string()
    }

    fn summary(&self) -> String {
        format!("{} [{}] entry {}", self.name, self.category.display_name(), self.entry_label())
    }
}

impl ListLine for Amenity {
    fn id_label(&self) -> String {
        self.id.to_string()
    }

    fn summary(&self) -> String {
        self.name.clone()
    }
}

impl ListLine for Booking {
    fn id_label(&self) -> String {
        self.id.to_string()
    }

    fn summary(&self) -> String {
        format!(
            "{} {} {} → {} ({} nights) {} {}",
            or_dash(Some(&self.reference)),
            self.listing_label(),
            self.check_in,
            self.check_out,
            self.nights(),
            self.total_price,
            booking_status(self.status)
        )
    }
}

impl ListLine for OwnerVerification {
    fn id_label(&self) -> String {
        self.id.to_string()
    }

    fn summary(&self) -> String {
        format!(
            "{} {} {}",
            self.owner_name(),
            or_dash(self.document_type.as_deref()),
            verification_status(self.status)
        )
    }
}

fn toned(label: &str, tone: StatusTone) -> String {
    match tone {
        StatusTone::Success => label.green().to_string(),
        StatusTone::Warning => label.yellow().to_string(),
        StatusTone::Danger => label.red().to_string(),
        StatusTone::Neutral => label.dimmed().to_string(),
    }
}

pub fn booking_status(status: BookingStatus) -> String {
    toned(status.display_name(), status.tone())
}

pub fn verification_status(status: VerificationStatus) -> String {
    toned(status.display_name(), status.tone())
}

/// Rows of a list page, one per line
pub fn render_rows<R: ListLine>(rows: &[R]) -> Vec<String> {
    let width = rows.iter().map(|r| r.id_label().len()).max().unwrap_or(0);
    rows.iter()
        .map(|r| {
            let id = format!("{:>width$}", r.id_label(), width = width);
            format!("{}  {}", id.bold(), r.summary())
        })
        .collect()
}

/// Footer of a list page
pub fn page_footer(count: usize, meta: Option<&PageMeta>) -> String {
    match meta {
        Some(meta) => match meta.total {
            Some(total) => format!(
                "Page {} of {} ({} of {} records)",
                meta.current_page, meta.last_page, count, total
            ),
            None => format!("Page {} of {} ({} records)", meta.current_page, meta.last_page, count),
        },
        None => format!("{} records", count),
    }
}

pub fn user_card(user: &User) -> String {
    format!("{} <{}> {}", user.name.bold(), user.email, user.user_type.display_name().dimmed())
}

pub fn record_ref(label: &str, id: EntityId) -> String {
    format!("{} #{}", label, id)
}
