//! Lounge management screen

use dioxus::prelude::*;
use sejour_client::ListQuery;
use sejour_core::LoungeCategory;
use sejour_model::{Amenity, Lounge, LoungeFormData};

use super::common::{amenity_list, rating_cell};
use crate::components::{
    AddressBlock, AmenitySelect, FormShell, ImagePicker, ListingTable, NumberInput, PageHeader,
    PrimaryButton, Select, TextArea, TextInput, choice_options, choice_value, optional_text,
    pick_choice,
};
use crate::hooks::{Column, Editor, edit_delete, use_amenities, use_client, use_editor, use_listing};

fn lounge_columns() -> Vec<Column<Lounge>> {
    vec![
        Column::new("name", "Name", |l| l.name.as_str().into()),
        Column::new("category", "Category", |l| l.category.display_name().into()),
        Column::new("city", "City", |l| l.location.city.as_str().into()),
        Column::new("entry", "Entry", |l| l.entry_label().into()),
        Column::new("rating", "Rating", |l| rating_cell(l.rating)),
    ]
}

/// Lounges of one category, or all of them
pub fn category_query(category: Option<LoungeCategory>) -> ListQuery {
    match category {
        Some(category) => ListQuery::new().category(category.display_name().to_uppercase()),
        None => ListQuery::new(),
    }
}

#[component]
pub fn LoungesPage() -> Element {
    let mut listing = use_listing::<Lounge>(ListQuery::new);
    let mut editor = use_editor::<LoungeFormData>();
    let mut category = use_signal(|| None::<LoungeCategory>);
    let amenities = use_amenities();
    let view = listing.view(&lounge_columns(), edit_delete);

    let on_category = move |e: FormEvent| {
        let picked = pick_choice(LoungeCategory::all(), &e.value());
        category.set(picked);
        listing.set_query(category_query(picked));
    };

    rsx! {
        div {
            class: "p-8",
            PageHeader {
                title: "Lounges",
                subtitle: "Bars, clubs and rooftops",
                label {
                    class: "flex items-center gap-2 text-sm text-slate-400",
                    "Category"
                    select {
                        class: "px-3 py-1.5 bg-slate-800 border border-slate-700 rounded-lg text-sm text-slate-100",
                        onchange: on_category,
                        option { value: "", selected: category().is_none(), "All" }
                        for choice in choice_options(LoungeCategory::all(), LoungeCategory::display_name) {
                            option {
                                key: "{choice.value}",
                                value: "{choice.value}",
                                selected: category().is_some_and(|c| choice_value(LoungeCategory::all(), &c) == choice.value),
                                "{choice.label}"
                            }
                        }
                    }
                }
                PrimaryButton {
                    label: "New lounge",
                    on_click: move |_| editor.create(LoungeFormData::default()),
                }
            }
            ListingTable::<Lounge> {
                listing,
                view,
                on_edit: move |lounge: Lounge| editor.edit(lounge.id, &lounge),
            }
            if editor.is_open() {
                LoungeForm {
                    editor,
                    amenities: amenity_list(&amenities),
                    on_saved: move |_| listing.reload(),
                }
            }
        }
    }
}

#[component]
fn LoungeForm(editor: Editor<LoungeFormData>, amenities: Vec<Amenity>, on_saved: EventHandler<()>) -> Element {
    let ctx = use_client();
    let mut editor = editor;
    let mut form = editor.form;
    let values = form.read().values.clone();

    rsx! {
        FormShell::<LoungeFormData> {
            form,
            on_close: move |_| editor.close(),
            on_submit: move |_| editor.submit::<Lounge>(ctx.clone(), move |_| on_saved.call(())),

            div {
                class: "grid grid-cols-2 gap-3",
                TextInput {
                    label: "Name",
                    value: values.name.clone(),
                    required: true,
                    error: form.read().error("name"),
                    on_change: move |v: String| form.write().update("name", |d| d.name = v),
                }
                Select {
                    label: "Category",
                    value: choice_value(LoungeCategory::all(), &values.category),
                    options: choice_options(LoungeCategory::all(), LoungeCategory::display_name),
                    on_change: move |v: String| {
                        if let Some(category) = pick_choice(LoungeCategory::all(), &v) {
                            form.write().update("category", |d| d.category = category);
                        }
                    },
                }
                NumberInput {
                    label: "Entry price",
                    value: values.entry_price,
                    unit: "XAF",
                    error: form.read().error("entry_price"),
                    on_change: move |v: Option<f64>| form.write().update("entry_price", |d| d.entry_price = v),
                }
                TextInput {
                    label: "Opening hours",
                    placeholder: "20:00 - 04:00",
                    value: values.opening_hours.clone().unwrap_or_default(),
                    error: form.read().error("opening_hours"),
                    on_change: move |v: String| {
                        form.write().update("opening_hours", |d| d.opening_hours = optional_text(v));
                    },
                }
            }
            TextArea {
                label: "Description",
                value: values.description.clone().unwrap_or_default(),
                error: form.read().error("description"),
                on_change: move |v: String| form.write().update("description", |d| d.description = optional_text(v)),
            }
            AddressBlock::<LoungeFormData> { form }
            ImagePicker::<LoungeFormData> { form }
            AmenitySelect::<LoungeFormData> { form, amenities }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_query() {
        assert_eq!(category_query(None).cache_key("lounges"), "lounges");
        assert_eq!(
            category_query(Some(LoungeCategory::Rooftop)).cache_key("lounges"),
            "lounges?category=ROOFTOP"
        );
    }
}
