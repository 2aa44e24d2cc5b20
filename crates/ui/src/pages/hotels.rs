//! Hotel and room management screens

use dioxus::prelude::*;
use sejour_client::ListQuery;
use sejour_core::{EntityId, RoomType};
use sejour_model::{Amenity, Hotel, HotelFormData, Room, RoomFormData};

use super::common::{
    ParentFilter, amenity_list, count_cell, id_value, money_cell, parent_query, parse_id,
    rating_cell, use_parent_options,
};
use crate::components::{
    AddressBlock, AmenitySelect, Checkbox, FormShell, ImagePicker, ListingTable, NumberInput,
    PageHeader, PrimaryButton, Select, SelectOption, TextArea, TextInput, choice_options,
    choice_value, optional_text, pick_choice,
};
use crate::hooks::{
    CellValue, Column, Editor, edit_delete, use_amenities, use_client, use_editor, use_listing,
    with_availability,
};

// ============================================================================
// Hotels
// ============================================================================

fn hotel_columns() -> Vec<Column<Hotel>> {
    vec![
        Column::new("name", "Name", |h| h.name.as_str().into()),
        Column::new("city", "City", |h| h.location.city.as_str().into()),
        Column::new("stars", "Stars", |h| CellValue::Number(f64::from(h.stars))),
        Column::new("rooms", "Rooms", |h| count_cell(h.rooms_count)),
        Column::new("min_rate", "From", |h| money_cell(h.min_rate)),
        Column::new("rating", "Rating", |h| rating_cell(h.rating)),
    ]
}

/// Hotel listing with create, edit and delete
#[component]
pub fn HotelsPage() -> Element {
    let mut listing = use_listing::<Hotel>(ListQuery::new);
    let mut editor = use_editor::<HotelFormData>();
    let amenities = use_amenities();
    let view = listing.view(&hotel_columns(), edit_delete);

    rsx! {
        div {
            class: "p-8",
            PageHeader {
                title: "Hotels",
                subtitle: "Your hotels, their address and amenities",
                PrimaryButton {
                    label: "New hotel",
                    on_click: move |_| editor.create(HotelFormData::default()),
                }
            }
            ListingTable::<Hotel> {
                listing,
                view,
                on_edit: move |hotel: Hotel| editor.edit(hotel.id, &hotel),
            }
            if editor.is_open() {
                HotelForm {
                    editor,
                    amenities: amenity_list(&amenities),
                    on_saved: move |_| listing.reload(),
                }
            }
        }
    }
}

#[component]
fn HotelForm(editor: Editor<HotelFormData>, amenities: Vec<Amenity>, on_saved: EventHandler<()>) -> Element {
    let ctx = use_client();
    let mut editor = editor;
    let mut form = editor.form;
    let values = form.read().values.clone();
    let stars: Vec<SelectOption> = (1..=5u8)
        .map(|n| SelectOption::new(n.to_string(), "★".repeat(usize::from(n))))
        .collect();

    rsx! {
        FormShell::<HotelFormData> {
            form,
            on_close: move |_| editor.close(),
            on_submit: move |_| editor.submit::<Hotel>(ctx.clone(), move |_| on_saved.call(())),

            TextInput {
                label: "Name",
                value: values.name.clone(),
                required: true,
                error: form.read().error("name"),
                on_change: move |v: String| form.write().update("name", |d| d.name = v),
            }
            TextArea {
                label: "Description",
                value: values.description.clone().unwrap_or_default(),
                error: form.read().error("description"),
                on_change: move |v: String| form.write().update("description", |d| d.description = optional_text(v)),
            }
            div {
                class: "grid grid-cols-3 gap-3",
                Select {
                    label: "Stars",
                    value: values.stars.to_string(),
                    options: stars,
                    placeholder: "Select",
                    error: form.read().error("stars"),
                    on_change: move |v: String| {
                        let stars = v.parse().unwrap_or_default();
                        form.write().update("stars", |d| d.stars = stars);
                    },
                }
                TextInput {
                    label: "Phone",
                    input_type: "tel",
                    value: values.phone.clone().unwrap_or_default(),
                    error: form.read().error("phone"),
                    on_change: move |v: String| form.write().update("phone", |d| d.phone = optional_text(v)),
                }
                TextInput {
                    label: "Email",
                    input_type: "email",
                    value: values.email.clone().unwrap_or_default(),
                    error: form.read().error("email"),
                    on_change: move |v: String| form.write().update("email", |d| d.email = optional_text(v)),
                }
            }
            AddressBlock::<HotelFormData> { form }
            ImagePicker::<HotelFormData> { form }
            AmenitySelect::<HotelFormData> { form, amenities }
        }
    }
}

// ============================================================================
// Rooms
// ============================================================================

fn room_columns() -> Vec<Column<Room>> {
    vec![
        Column::new("name", "Name", |r| r.name.as_str().into()),
        Column::new("type", "Type", |r| r.room_type.display_name().into()),
        Column::new("price", "Price", |r| CellValue::Money(r.price)),
        Column::new("capacity", "Guests", |r| CellValue::Number(f64::from(r.capacity))),
        Column::new("available", "Available", |r| CellValue::Flag(r.is_available)),
    ]
}

/// Rooms, optionally narrowed to one hotel
#[component]
pub fn RoomsPage() -> Element {
    let mut listing = use_listing::<Room>(ListQuery::new);
    let mut editor = use_editor::<RoomFormData>();
    let mut hotel = use_signal(|| None::<EntityId>);
    let hotels = use_parent_options::<Hotel>();
    let amenities = use_amenities();
    let view = listing.view(&room_columns(), |r: &Room| with_availability(r.is_available));

    rsx! {
        div {
            class: "p-8",
            PageHeader {
                title: "Rooms",
                subtitle: "Room types, prices and availability",
                ParentFilter {
                    label: "Hotel",
                    value: id_value(hotel()),
                    options: hotels(),
                    on_change: move |id: Option<EntityId>| {
                        hotel.set(id);
                        listing.set_query(parent_query("hotel_id", id));
                    },
                }
                PrimaryButton {
                    label: "New room",
                    on_click: move |_| editor.create(hotel().map(RoomFormData::for_hotel).unwrap_or_default()),
                }
            }
            ListingTable::<Room> {
                listing,
                view,
                on_edit: move |room: Room| editor.edit(room.id, &room),
            }
            if editor.is_open() {
                RoomForm {
                    editor,
                    hotels: hotels(),
                    amenities: amenity_list(&amenities),
                    on_saved: move |_| listing.reload(),
                }
            }
        }
    }
}

#[component]
fn RoomForm(
    editor: Editor<RoomFormData>,
    hotels: Vec<SelectOption>,
    amenities: Vec<Amenity>,
    on_saved: EventHandler<()>,
) -> Element {
    let ctx = use_client();
    let mut editor = editor;
    let mut form = editor.form;
    let values = form.read().values.clone();

    rsx! {
        FormShell::<RoomFormData> {
            form,
            on_close: move |_| editor.close(),
            on_submit: move |_| editor.submit::<Room>(ctx.clone(), move |_| on_saved.call(())),

            div {
                class: "grid grid-cols-2 gap-3",
                Select {
                    label: "Hotel",
                    value: id_value(values.hotel_id),
                    options: hotels,
                    placeholder: "Select a hotel",
                    required: true,
                    error: form.read().error("hotel_id"),
                    on_change: move |v: String| form.write().update("hotel_id", |d| d.hotel_id = parse_id(&v)),
                }
                TextInput {
                    label: "Name",
                    value: values.name.clone(),
                    required: true,
                    error: form.read().error("name"),
                    on_change: move |v: String| form.write().update("name", |d| d.name = v),
                }
                Select {
                    label: "Type",
                    value: choice_value(RoomType::all(), &values.room_type),
                    options: choice_options(RoomType::all(), RoomType::display_name),
                    on_change: move |v: String| {
                        if let Some(room_type) = pick_choice(RoomType::all(), &v) {
                            form.write().update("room_type", |d| d.room_type = room_type);
                        }
                    },
                }
                NumberInput {
                    label: "Price per night",
                    value: values.price,
                    unit: "XAF",
                    required: true,
                    error: form.read().error("price"),
                    on_change: move |v: Option<f64>| form.write().update("price", |d| d.price = v),
                }
                NumberInput {
                    label: "Capacity",
                    value: values.capacity.map(f64::from),
                    unit: "guests",
                    required: true,
                    error: form.read().error("capacity"),
                    on_change: move |v: Option<f64>| {
                        form.write().update("capacity", |d| d.capacity = v.map(|c| c.max(0.0) as u32));
                    },
                }
            }
            Checkbox {
                label: "Available for booking",
                checked: values.is_available,
                on_change: move |v: bool| form.write().update("is_available", |d| d.is_available = v),
            }
            ImagePicker::<RoomFormData> { form }
            AmenitySelect::<RoomFormData> { form, amenities }
        }
    }
}
