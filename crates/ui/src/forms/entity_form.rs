//! Generic entity form
//!
//! One state machine drives every listing form (hotel, room, residence,
//! dwelling, restaurant, menu item, lounge). It is parameterised by the
//! entity's FormData, which is also its validation schema.
//!
//! Submitting is split into steps so the UI never holds form state across an
//! await point:
//!
//! 1. [`EntityForm::prepare`] validates locally and hands out the payload
//! 2. the caller runs the mutation
//! 3. [`EntityForm::finish`] routes the outcome (server field errors go
//!    back through the [`ServerErrorAdapter`])
//!
//! [`EntityForm::submit_with`] chains the three for headless callers.

use std::future::Future;

use sejour_client::{ClientError, ClientResult, ImageUpload};
use sejour_core::EntityId;
use sejour_model::{AddressFields, FieldErrors, FormSchema, IMAGES_FIELD};

use super::address::AddressAutocomplete;
use super::amenities::AmenitySelection;
use super::images::ImageSelection;
use super::server_errors::ServerErrorAdapter;

/// Images handed to the submit callback
pub type FormImages = ImageUpload;

/// Whether the form creates a record or edits one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(EntityId),
}

/// Outcome of a submit attempt
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitResult<T> {
    /// The callback ran and succeeded
    Submitted(T),
    /// Local or server field errors; the callback did not succeed
    Invalid(FieldErrors),
    /// A failure that belongs to no field
    ServerError(String),
    /// A submission was already running; nothing was sent
    Busy,
}

impl<T> SubmitResult<T> {
    pub fn is_submitted(&self) -> bool {
        matches!(self, SubmitResult::Submitted(_))
    }
}

/// Result of local validation
#[derive(Debug, Clone, PartialEq)]
pub enum Prepared<S> {
    /// Valid payload plus the images to send
    Ready(S, FormImages),
    /// Field or image-area errors; nothing was sent
    Invalid(FieldErrors),
    /// A submission is already running
    Busy,
}

/// State of one entity form
#[derive(Debug, Clone, PartialEq)]
pub struct EntityForm<S: FormSchema> {
    pub values: S,
    pub images: ImageSelection,
    pub amenities: AmenitySelection,
    pub address: AddressAutocomplete,
    mode: FormMode,
    errors: FieldErrors,
    server: ServerErrorAdapter,
    submitting: bool,
}

impl<S: FormSchema> EntityForm<S> {
    /// Blank form
    pub fn create() -> Self {
        Self::create_with(S::default())
    }

    /// Create-mode form with preset values (e.g. the parent hotel of a room)
    pub fn create_with(values: S) -> Self {
        let amenities = AmenitySelection::from_ids(values.amenities().unwrap_or_default());
        Self {
            server: default_adapter(&values),
            values,
            images: ImageSelection::new(),
            amenities,
            address: AddressAutocomplete::new(),
            mode: FormMode::Create,
            errors: FieldErrors::new(),
            submitting: false,
        }
    }

    /// Edit-mode form pre-populated from a record
    pub fn edit(id: EntityId, record: &S::Record) -> Self {
        let values = S::from_record(record);
        let mut form = Self::create_with(values);
        form.images = ImageSelection::from_existing(&S::record_images(record));
        form.mode = FormMode::Edit(id);
        form
    }

    /// Replace the server error mapping
    pub fn with_error_mapping(mut self, adapter: ServerErrorAdapter) -> Self {
        self.server = adapter;
        self
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    /// Dialog title, e.g. "New hotel" / "Edit hotel"
    pub fn title(&self) -> String {
        match self.mode {
            FormMode::Create => format!("New {}", S::ENTITY),
            FormMode::Edit(_) => format!("Edit {}", S::ENTITY),
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Local errors merged with mapped server errors
    pub fn errors(&self) -> FieldErrors {
        let mut errors = self.errors.clone();
        errors.merge(self.server.field_errors().clone());
        errors
    }

    /// First message of a field, for inline display
    pub fn error(&self, field: &str) -> Option<String> {
        self.errors().first(field).map(str::to_string)
    }

    /// Messages of the unmapped-error panel
    pub fn panel(&self) -> &[String] {
        if self.server.is_panel_open() {
            self.server.panel()
        } else {
            &[]
        }
    }

    pub fn close_panel(&mut self) {
        self.server.close_panel();
    }

    /// Forget the error of a field once the user edits it
    pub fn touch(&mut self, field: &str) {
        self.errors.clear_field(field);
    }

    /// Apply an edit to the payload and forget the field's error
    pub fn update(&mut self, field: &str, apply: impl FnOnce(&mut S)) {
        apply(&mut self.values);
        self.touch(field);
    }

    /// Toggle an amenity and mirror the selection into the payload
    pub fn toggle_amenity(&mut self, id: u64) {
        self.amenities.toggle(id);
        self.values.set_amenities(self.amenities.ids());
        self.errors.clear_field("amenities");
    }

    /// Register an edit of the address text
    pub fn on_address_input(&mut self, text: &str) -> Option<super::address::SearchTicket> {
        let address = self.values.address_mut()?;
        address.address = text.to_string();
        self.errors.clear_field("address");
        self.address.on_input(text)
    }

    /// Pick an address suggestion
    pub fn select_address(&mut self, index: usize) -> bool {
        let Some(fields) = self.values.address_mut() else {
            return false;
        };
        let mut block: AddressFields = fields.clone();
        if !self.address.select(index, &mut block) {
            return false;
        }
        *fields = block;
        for field in ["address", "city", "country", "latitude", "longitude"] {
            self.errors.clear_field(field);
        }
        true
    }

    /// Validate everything and hand out the payload
    ///
    /// Clears server errors from the previous attempt. All failing fields
    /// are reported together with the image-area error.
    pub fn prepare(&mut self) -> Prepared<S> {
        if self.submitting {
            return Prepared::Busy;
        }
        self.server.clear();

        self.values.set_amenities(self.amenities.ids());
        let mut errors = self.values.check();
        if S::WITH_IMAGES {
            if let Some(message) = self.images.error() {
                errors.add(IMAGES_FIELD, message);
            }
        }

        if !errors.is_empty() {
            tracing::debug!(
                entity = S::ENTITY,
                fields = errors.len(),
                "Form has invalid fields"
            );
            self.errors = errors.clone();
            return Prepared::Invalid(errors);
        }

        self.errors.clear();
        self.submitting = true;
        let images = if S::WITH_IMAGES {
            self.images.to_upload()
        } else {
            FormImages::default()
        };
        Prepared::Ready(self.values.clone(), images)
    }

    /// Route the outcome of the submit callback
    pub fn finish<T>(&mut self, result: ClientResult<T>) -> SubmitResult<T> {
        self.submitting = false;
        match result {
            Ok(value) => SubmitResult::Submitted(value),
            Err(e) => self.fail(&e),
        }
    }

    fn fail<T>(&mut self, error: &ClientError) -> SubmitResult<T> {
        self.server.apply(error);
        if error.is_validation() && !self.server.field_errors().is_empty() {
            SubmitResult::Invalid(self.server.field_errors().clone())
        } else {
            tracing::warn!(entity = S::ENTITY, "Submission failed: {}", error);
            let message = self
                .server
                .panel()
                .first()
                .cloned()
                .unwrap_or_else(|| error.user_message());
            SubmitResult::ServerError(message)
        }
    }

    /// Validate, run `on_submit` once, and route its outcome
    pub async fn submit_with<T, F, Fut>(&mut self, on_submit: F) -> SubmitResult<T>
    where
        F: FnOnce(S, FormImages) -> Fut,
        Fut: Future<Output = ClientResult<T>>,
    {
        match self.prepare() {
            Prepared::Ready(payload, images) => {
                let result = on_submit(payload, images).await;
                self.finish(result)
            }
            Prepared::Invalid(errors) => SubmitResult::Invalid(errors),
            Prepared::Busy => SubmitResult::Busy,
        }
    }
}

/// Identity mapping for every payload key, plus the image parts
fn default_adapter<S: FormSchema>(values: &S) -> ServerErrorAdapter {
    let keys: Vec<String> = match serde_json::to_value(values) {
        Ok(serde_json::Value::Object(map)) => map.keys().cloned().collect(),
        _ => Vec::new(),
    };
    let adapter = ServerErrorAdapter::new(keys.iter().map(|k| (k.as_str(), k.as_str())));
    adapter
        .map("main_image", IMAGES_FIELD)
        .map("gallery_images", IMAGES_FIELD)
        .map("images", IMAGES_FIELD)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sejour_client::UploadFile;
    use sejour_model::{
        BookingRequest, Hotel, HotelFormData, ImageRef, ImageSet, MenuItemFormData, RoomFormData,
    };
    use std::cell::Cell;

    fn image(name: &str) -> UploadFile {
        UploadFile::from_bytes(name, vec![0xFF])
    }

    fn valid_hotel() -> HotelFormData {
        HotelFormData {
            name: "Hotel Wouri".to_string(),
            address: AddressFields {
                address: "1 Rue Centrale".to_string(),
                city: "Douala".to_string(),
                country: "Cameroon".to_string(),
                latitude: Some(4.05),
                longitude: Some(9.7),
            },
            stars: 3,
            ..Default::default()
        }
    }

    fn hotel_record() -> Hotel {
        serde_json::from_value(serde_json::json!({
            "id": 5,
            "name": "Hotel Akwa",
            "address": "Bd de la Liberte",
            "city": "Douala",
            "country": "Cameroon",
            "latitude": 4.05,
            "longitude": 9.7,
            "stars": 4,
            "main_image": { "id": 10, "url": "https://cdn.test/10.jpg" },
            "gallery": [{ "id": 11, "url": "https://cdn.test/11.jpg" }],
            "amenities": [{ "id": 2, "name": "Wifi" }, { "id": 4, "name": "Pool" }]
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_blank_form_reports_every_field_and_skips_callback() {
        let mut form = EntityForm::<RoomFormData>::create();
        let calls = Cell::new(0);

        let result = form
            .submit_with(|_, _| async {
                calls.set(calls.get() + 1);
                Ok(())
            })
            .await;

        assert_eq!(calls.get(), 0);
        let SubmitResult::Invalid(errors) = result else {
            panic!("expected invalid result");
        };
        for field in ["hotel_id", "name", "price", "images"] {
            assert!(errors.has(field), "missing error for {}", field);
        }
        assert_eq!(form.error("hotel_id").as_deref(), Some("Select a hotel"));
    }

    #[tokio::test]
    async fn test_create_without_image_then_with_one() {
        let mut form = EntityForm::create_with(valid_hotel());
        let counter = Cell::new(0);
        let calls = &counter;

        let blocked = form
            .submit_with(|_, _| async {
                calls.set(calls.get() + 1);
                Ok(())
            })
            .await;
        let SubmitResult::Invalid(errors) = blocked else {
            panic!("expected image error");
        };
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec![IMAGES_FIELD]);
        assert_eq!(calls.get(), 0);

        form.images.add_files([image("front.jpg")]);
        let result = form
            .submit_with(|payload, images| async move {
                calls.set(calls.get() + 1);
                assert_eq!(payload.name, "Hotel Wouri");
                assert_eq!(images.main_image.unwrap().file_name, "front.jpg");
                Ok(payload.name)
            })
            .await;

        assert_eq!(result, SubmitResult::Submitted("Hotel Wouri".to_string()));
        assert_eq!(calls.get(), 1);
        assert!(!form.is_submitting());
    }

    #[tokio::test]
    async fn test_edit_with_existing_images_succeeds() {
        let record = hotel_record();
        let mut form = EntityForm::<HotelFormData>::edit(record.id, &record);

        assert_eq!(form.mode(), FormMode::Edit(EntityId(5)));
        assert_eq!(form.title(), "Edit hotel");
        assert_eq!(form.values.name, "Hotel Akwa");
        assert_eq!(form.images.total(), 2);
        assert_eq!(form.amenities.ids(), vec![2, 4]);

        let result = form
            .submit_with(|payload, images| async move {
                assert!(!images.has_files());
                Ok(payload.amenities)
            })
            .await;
        assert_eq!(result, SubmitResult::Submitted(vec![2, 4]));
    }

    #[tokio::test]
    async fn test_eleven_images_are_blocked() {
        let mut form = EntityForm::create_with(valid_hotel());
        form.images.add_files((0..11).map(|i| image(&format!("{}.jpg", i))));

        let result = form.submit_with(|_, _| async { Ok(()) }).await;
        let SubmitResult::Invalid(errors) = result else {
            panic!("expected count error");
        };
        assert!(errors.first(IMAGES_FIELD).unwrap().contains("at most 10"));
    }

    #[tokio::test]
    async fn test_server_field_errors_map_back() {
        let mut form = EntityForm::create_with(valid_hotel());
        form.images.add_files([image("a.jpg")]);

        let result = form
            .submit_with(|_, _| async {
                Err::<(), _>(ClientError::from_response(
                    422,
                    r#"{"errors":{"name":["already taken"],"main_image":["too large"],"owner":["suspended"]}}"#,
                ))
            })
            .await;

        let SubmitResult::Invalid(errors) = result else {
            panic!("expected mapped errors");
        };
        assert_eq!(errors.first("name"), Some("already taken"));
        assert_eq!(errors.first(IMAGES_FIELD), Some("too large"));
        assert_eq!(form.panel(), ["suspended".to_string()]);

        // Cleared at the next attempt
        let retry = form.submit_with(|_, _| async { Ok(()) }).await;
        assert!(retry.is_submitted());
        assert!(form.panel().is_empty());
        assert!(form.errors().is_empty());
    }

    #[tokio::test]
    async fn test_non_field_failure_is_server_error() {
        let mut form = EntityForm::create_with(valid_hotel());
        form.images.add_files([image("a.jpg")]);

        let result = form
            .submit_with(|_, _| async {
                Err::<(), _>(ClientError::from_response(500, r#"{"message":"Database down"}"#))
            })
            .await;
        assert_eq!(result, SubmitResult::ServerError("Database down".to_string()));
    }

    #[test]
    fn test_prepare_twice_is_busy() {
        let mut form = EntityForm::create_with(valid_hotel());
        form.images.add_files([image("a.jpg")]);
        assert!(matches!(form.prepare(), Prepared::Ready(..)));
        assert_eq!(form.prepare(), Prepared::Busy);
        let _ = form.finish(Ok(()));
        assert!(matches!(form.prepare(), Prepared::Ready(..)));
    }

    #[tokio::test]
    async fn test_update_clears_field_error() {
        let mut form = EntityForm::<RoomFormData>::create();
        let _ = form.submit_with(|_, _| async { Ok(()) }).await;
        assert!(form.error("name").is_some());

        form.update("name", |room| room.name = "Suite 12".to_string());
        assert_eq!(form.values.name, "Suite 12");
        assert_eq!(form.error("name"), None);
        assert!(form.error("price").is_some());
    }

    #[test]
    fn test_amenity_toggle_reaches_payload() {
        let mut form = EntityForm::<HotelFormData>::create();
        form.toggle_amenity(3);
        form.toggle_amenity(1);
        form.toggle_amenity(3);
        assert_eq!(form.values.amenities, vec![1]);
    }

    #[test]
    fn test_address_suggestion_fills_payload() {
        let mut form = EntityForm::<HotelFormData>::create();
        form.errors = FieldErrors::single("city", "City is required");

        let ticket = form.on_address_input("12 Rue").unwrap();
        form.address.resolve(
            &ticket,
            Ok(vec![sejour_client::AddressSuggestion {
                label: "12 Rue Joss, Douala".to_string(),
                address: "12 Rue Joss".to_string(),
                city: "Douala".to_string(),
                country: "Cameroun".to_string(),
                latitude: 4.04,
                longitude: 9.69,
            }]),
        );
        assert!(form.select_address(0));
        assert_eq!(form.values.address.city, "Douala");
        assert_eq!(form.values.address.longitude, Some(9.69));
        assert!(form.error("city").is_none());
    }

    #[test]
    fn test_forms_without_address_or_images() {
        let mut booking = EntityForm::<BookingRequest>::create();
        assert!(booking.on_address_input("Douala").is_none());
        let Prepared::Invalid(errors) = booking.prepare() else {
            panic!("blank booking is invalid");
        };
        assert!(!errors.has(IMAGES_FIELD));

        let item = EntityForm::<MenuItemFormData>::create();
        assert!(!item.is_edit());
        assert_eq!(item.title(), "New menu item");
    }

    #[test]
    fn test_record_images_preload() {
        let set = ImageSet {
            main_image: Some(ImageRef::new("https://cdn.test/a.jpg")),
            gallery: vec![],
        };
        let selection = ImageSelection::from_existing(&set);
        assert_eq!(selection.previews()[0].url.as_deref(), Some("https://cdn.test/a.jpg"));
    }
}
