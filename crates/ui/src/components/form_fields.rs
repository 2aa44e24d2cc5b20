//! # Entity Form Parts
//!
//! The optional blocks of the generic entity form: address with
//! autocomplete, image picker and amenity checklist. Each one works on the
//! [`EntityForm`] signal of its page, so a form only renders the blocks its
//! schema uses.

use dioxus::prelude::*;
use sejour_model::{Amenity, FormSchema, IMAGES_FIELD, MAX_IMAGES};

use super::inputs::{FieldError, NumberInput, TextInput};
use crate::file_ops;
use crate::forms::{EntityForm, ImagePreview, debounced_search};
use crate::hooks::use_geocoder;

// ============================================================================
// Address Block
// ============================================================================

/// Address, city, country and coordinates, with suggestions under the
/// address field
#[component]
pub fn AddressBlock<S: FormSchema + 'static>(form: Signal<EntityForm<S>>) -> Element {
    let mut form = form;
    let geocoder = use_geocoder();

    let (fields, suggestions, loading) = {
        let state = form.read();
        let Some(fields) = state.values.address().cloned() else {
            return rsx! {};
        };
        (fields, state.address.suggestions().to_vec(), state.address.is_loading())
    };

    let on_address = move |text: String| {
        let ticket = form.write().on_address_input(&text);
        if let Some(ticket) = ticket {
            let geocoder = geocoder.clone();
            spawn(async move {
                let result =
                    debounced_search(geocoder.as_ref(), &ticket, |t| form.peek().address.is_current(t))
                        .await;
                if let Some(result) = result {
                    form.write().address.resolve(&ticket, result);
                }
            });
        }
    };

    rsx! {
        fieldset {
            class: "space-y-3",
            legend { class: "text-sm font-semibold text-slate-400 mb-2", "Location" }

            div {
                class: "relative",
                TextInput {
                    label: "Address",
                    value: fields.address.clone(),
                    placeholder: "Start typing an address",
                    required: true,
                    error: form.read().error("address"),
                    on_change: on_address,
                }
                if loading {
                    span { class: "absolute right-3 top-9 text-xs text-slate-400 animate-pulse", "Searching..." }
                }
                if !suggestions.is_empty() {
                    ul {
                        class: "absolute z-10 mt-1 w-full bg-slate-800 border border-slate-600 rounded-lg shadow-lg max-h-60 overflow-y-auto",
                        for (index, suggestion) in suggestions.iter().enumerate() {
                            li {
                                key: "{index}",
                                class: "px-3 py-2 text-sm cursor-pointer hover:bg-slate-700",
                                onclick: move |_| {
                                    form.write().select_address(index);
                                },
                                "{suggestion.label}"
                            }
                        }
                    }
                }
            }

            div {
                class: "grid grid-cols-2 gap-3",
                TextInput {
                    label: "City",
                    value: fields.city.clone(),
                    required: true,
                    error: form.read().error("city"),
                    on_change: move |value: String| {
                        let mut state = form.write();
                        if let Some(address) = state.values.address_mut() {
                            address.city = value;
                        }
                        state.touch("city");
                    },
                }
                TextInput {
                    label: "Country",
                    value: fields.country.clone(),
                    required: true,
                    error: form.read().error("country"),
                    on_change: move |value: String| {
                        let mut state = form.write();
                        if let Some(address) = state.values.address_mut() {
                            address.country = value;
                        }
                        state.touch("country");
                    },
                }
                NumberInput {
                    label: "Latitude",
                    value: fields.latitude,
                    required: true,
                    error: form.read().error("latitude"),
                    on_change: move |value: Option<f64>| {
                        let mut state = form.write();
                        if let Some(address) = state.values.address_mut() {
                            address.latitude = value;
                        }
                        state.touch("latitude");
                    },
                }
                NumberInput {
                    label: "Longitude",
                    value: fields.longitude,
                    required: true,
                    error: form.read().error("longitude"),
                    on_change: move |value: Option<f64>| {
                        let mut state = form.write();
                        if let Some(address) = state.values.address_mut() {
                            address.longitude = value;
                        }
                        state.touch("longitude");
                    },
                }
            }
        }
    }
}

// ============================================================================
// Image Picker
// ============================================================================

/// Stored images and picked files, with add and remove controls
#[component]
pub fn ImagePicker<S: FormSchema + 'static>(form: Signal<EntityForm<S>>) -> Element {
    let mut form = form;
    let previews = form.read().images.previews();
    let error = form.read().error(IMAGES_FIELD);
    let count = previews.len();

    let on_pick = move |_| {
        spawn(async move {
            let files = file_ops::pick_images().await;
            if !files.is_empty() {
                let mut state = form.write();
                state.images.add_files(files);
                state.touch(IMAGES_FIELD);
            }
        });
    };

    rsx! {
        fieldset {
            class: "space-y-2",
            div {
                class: "flex items-center justify-between",
                legend { class: "text-sm font-semibold text-slate-400", "Images" }
                span { class: "text-xs text-slate-500", "{count} / {MAX_IMAGES}" }
            }

            div {
                class: "grid grid-cols-4 gap-2",
                for preview in previews {
                    ImageTile {
                        key: "{preview.key:?}",
                        preview: preview.clone(),
                        on_remove: move |_| {
                            form.write().images.remove(preview.key);
                        },
                    }
                }
                button {
                    r#type: "button",
                    class: "h-24 flex flex-col items-center justify-center border-2 border-dashed border-slate-600 hover:border-indigo-500 rounded-lg text-slate-400 hover:text-indigo-300 transition-colors",
                    onclick: on_pick,
                    span { class: "text-2xl", "+" }
                    span { class: "text-xs", "Add images" }
                }
            }

            p { class: "text-xs text-slate-500", "The first image is used as the main image." }
            FieldError { error }
        }
    }
}

#[component]
fn ImageTile(preview: ImagePreview, on_remove: EventHandler<()>) -> Element {
    rsx! {
        div {
            class: "relative h-24 rounded-lg overflow-hidden bg-slate-700 group",
            if let Some(url) = &preview.url {
                img { class: "w-full h-full object-cover", src: "{url}", alt: "{preview.label}" }
            } else {
                div {
                    class: "w-full h-full flex flex-col items-center justify-center p-2 text-center",
                    span { class: "text-xl", "🖼️" }
                    span { class: "text-xs text-slate-300 truncate w-full", "{preview.label}" }
                }
            }
            if preview.is_main {
                span { class: "absolute top-1 left-1 px-1.5 py-0.5 text-[10px] bg-indigo-600 rounded", "Main" }
            }
            if preview.removable {
                button {
                    r#type: "button",
                    class: "absolute top-1 right-1 w-6 h-6 rounded-full bg-black/60 text-white opacity-0 group-hover:opacity-100 transition-opacity",
                    title: "Remove",
                    onclick: move |_| on_remove.call(()),
                    "✕"
                }
            }
        }
    }
}

// ============================================================================
// Amenity Checklist
// ============================================================================

/// Checklist of every amenity known to the API
#[component]
pub fn AmenitySelect<S: FormSchema + 'static>(
    form: Signal<EntityForm<S>>,
    amenities: Vec<Amenity>,
) -> Element {
    let mut form = form;
    let selected = form.read().amenities.len();

    rsx! {
        fieldset {
            class: "space-y-2",
            div {
                class: "flex items-center justify-between",
                legend { class: "text-sm font-semibold text-slate-400", "Amenities" }
                span { class: "text-xs text-slate-500", "{selected} selected" }
            }
            if amenities.is_empty() {
                p { class: "text-sm text-slate-500", "No amenities available" }
            }
            div {
                class: "grid grid-cols-3 gap-2",
                for amenity in amenities {
                    label {
                        key: "{amenity.id}",
                        class: "flex items-center gap-2 text-sm text-slate-200 cursor-pointer",
                        input {
                            r#type: "checkbox",
                            class: "w-4 h-4 accent-indigo-600",
                            checked: form.read().amenities.contains(amenity.id),
                            onchange: move |_| form.write().toggle_amenity(amenity.id),
                        }
                        if let Some(icon) = &amenity.icon {
                            span { "{icon}" }
                        }
                        "{amenity.name}"
                    }
                }
            }
            FieldError { error: form.read().error("amenities") }
        }
    }
}
