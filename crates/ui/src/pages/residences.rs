//! Residence and dwelling management screens

use dioxus::prelude::*;
use sejour_client::ListQuery;
use sejour_core::{EntityId, ResidenceType, Standing, StructureType};
use sejour_model::{Amenity, Dwelling, DwellingFormData, Residence, ResidenceFormData};

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
// Residences
// ============================================================================

fn residence_columns() -> Vec<Column<Residence>> {
    vec![
        Column::new("name", "Name", |r| r.name.as_str().into()),
        Column::new("type", "Type", |r| r.residence_type.display_name().into()),
        Column::new("standing", "Standing", |r| r.standing.display_name().into()),
        Column::new("city", "City", |r| r.location.city.as_str().into()),
        Column::new("dwellings", "Units", |r| count_cell(r.dwellings_count)),
        Column::new("min_price", "From", |r| money_cell(r.min_price)),
        Column::new("rating", "Rating", |r| rating_cell(r.rating)),
    ]
}

#[component]
pub fn ResidencesPage() -> Element {
    let mut listing = use_listing::<Residence>(ListQuery::new);
    let mut editor = use_editor::<ResidenceFormData>();
    let amenities = use_amenities();
    let view = listing.view(&residence_columns(), edit_delete);

    rsx! {
        div {
            class: "p-8",
            PageHeader {
                title: "Residences",
                subtitle: "Furnished residences and their standing",
                PrimaryButton {
                    label: "New residence",
                    on_click: move |_| editor.create(ResidenceFormData::default()),
                }
            }
            ListingTable::<Residence> {
                listing,
                view,
                on_edit: move |residence: Residence| editor.edit(residence.id, &residence),
            }
            if editor.is_open() {
                ResidenceForm {
                    editor,
                    amenities: amenity_list(&amenities),
                    on_saved: move |_| listing.reload(),
                }
            }
        }
    }
}

#[component]
fn ResidenceForm(
    editor: Editor<ResidenceFormData>,
    amenities: Vec<Amenity>,
    on_saved: EventHandler<()>,
) -> Element {
    let ctx = use_client();
    let mut editor = editor;
    let mut form = editor.form;
    let values = form.read().values.clone();

    rsx! {
        FormShell::<ResidenceFormData> {
            form,
            on_close: move |_| editor.close(),
            on_submit: move |_| editor.submit::<Residence>(ctx.clone(), move |_| on_saved.call(())),

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
                class: "grid grid-cols-2 gap-3",
                Select {
                    label: "Type",
                    value: choice_value(ResidenceType::all(), &values.residence_type),
                    options: choice_options(ResidenceType::all(), ResidenceType::display_name),
                    on_change: move |v: String| {
                        if let Some(kind) = pick_choice(ResidenceType::all(), &v) {
                            form.write().update("residence_type", |d| d.residence_type = kind);
                        }
                    },
                }
                Select {
                    label: "Standing",
                    value: choice_value(Standing::all(), &values.standing),
                    options: choice_options(Standing::all(), Standing::display_name),
                    on_change: move |v: String| {
                        if let Some(standing) = pick_choice(Standing::all(), &v) {
                            form.write().update("standing", |d| d.standing = standing);
                        }
                    },
                }
            }
            AddressBlock::<ResidenceFormData> { form }
            ImagePicker::<ResidenceFormData> { form }
            AmenitySelect::<ResidenceFormData> { form, amenities }
        }
    }
}

// ============================================================================
// Dwellings
// ============================================================================

fn dwelling_columns() -> Vec<Column<Dwelling>> {
    vec![
        Column::new("name", "Name", |d| d.name.as_str().into()),
        Column::new("residence", "Residence", |d| d.residence_name.clone().into()),
        Column::new("structure", "Structure", |d| d.structure_type.display_name().into()),
        Column::new("price", "Price", |d| CellValue::Money(d.price)),
        Column::new("capacity", "Guests", |d| CellValue::Number(f64::from(d.capacity))),
        Column::new("available", "Available", |d| CellValue::Flag(d.is_available)),
    ]
}

#[component]
pub fn DwellingsPage() -> Element {
    let mut listing = use_listing::<Dwelling>(ListQuery::new);
    let mut editor = use_editor::<DwellingFormData>();
    let mut residence = use_signal(|| None::<EntityId>);
    let residences = use_parent_options::<Residence>();
    let amenities = use_amenities();
    let view = listing.view(&dwelling_columns(), |d: &Dwelling| with_availability(d.is_available));

    rsx! {
        div {
            class: "p-8",
            PageHeader {
                title: "Dwellings",
                subtitle: "Apartments and studios inside your residences",
                ParentFilter {
                    label: "Residence",
                    value: id_value(residence()),
                    options: residences(),
                    on_change: move |id: Option<EntityId>| {
                        residence.set(id);
                        listing.set_query(parent_query("residence_id", id));
                    },
                }
                PrimaryButton {
                    label: "New dwelling",
                    on_click: move |_| {
                        editor.create(residence().map(DwellingFormData::for_residence).unwrap_or_default())
                    },
                }
            }
            ListingTable::<Dwelling> {
                listing,
                view,
                on_edit: move |dwelling: Dwelling| editor.edit(dwelling.id, &dwelling),
            }
            if editor.is_open() {
                DwellingForm {
                    editor,
                    residences: residences(),
                    amenities: amenity_list(&amenities),
                    on_saved: move |_| listing.reload(),
                }
            }
        }
    }
}

#[component]
fn DwellingForm(
    editor: Editor<DwellingFormData>,
    residences: Vec<SelectOption>,
    amenities: Vec<Amenity>,
    on_saved: EventHandler<()>,
) -> Element {
    let ctx = use_client();
    let mut editor = editor;
    let mut form = editor.form;
    let values = form.read().values.clone();

    rsx! {
        FormShell::<DwellingFormData> {
            form,
            on_close: move |_| editor.close(),
            on_submit: move |_| editor.submit::<Dwelling>(ctx.clone(), move |_| on_saved.call(())),

            div {
                class: "grid grid-cols-2 gap-3",
                Select {
                    label: "Residence",
                    value: id_value(values.residence_id),
                    options: residences,
                    placeholder: "Select a residence",
                    required: true,
                    error: form.read().error("residence_id"),
                    on_change: move |v: String| {
                        form.write().update("residence_id", |d| d.residence_id = parse_id(&v));
                    },
                }
                TextInput {
                    label: "Name",
                    value: values.name.clone(),
                    required: true,
                    error: form.read().error("name"),
                    on_change: move |v: String| form.write().update("name", |d| d.name = v),
                }
                Select {
                    label: "Structure",
                    value: choice_value(StructureType::all(), &values.structure_type),
                    options: choice_options(StructureType::all(), StructureType::display_name),
                    on_change: move |v: String| {
                        if let Some(structure) = pick_choice(StructureType::all(), &v) {
                            form.write().update("structure_type", |d| d.structure_type = structure);
                        }
                    },
                }
                Select {
                    label: "Standing",
                    value: choice_value(Standing::all(), &values.standing),
                    options: choice_options(Standing::all(), Standing::display_name),
                    on_change: move |v: String| {
                        if let Some(standing) = pick_choice(Standing::all(), &v) {
                            form.write().update("standing", |d| d.standing = standing);
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
                NumberInput {
                    label: "Bedrooms",
                    value: values.bedrooms.map(f64::from),
                    error: form.read().error("bedrooms"),
                    on_change: move |v: Option<f64>| {
                        form.write().update("bedrooms", |d| d.bedrooms = v.map(|c| c.max(0.0) as u32));
                    },
                }
            }
            Checkbox {
                label: "Available for booking",
                checked: values.is_available,
                on_change: move |v: bool| form.write().update("is_available", |d| d.is_available = v),
            }
            ImagePicker::<DwellingFormData> { form }
            AmenitySelect::<DwellingFormData> { form, amenities }
        }
    }
}
