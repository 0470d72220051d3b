//! Create / edit asset form

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::{
    error::{AppError, AppResult},
    models::{Asset, AssetPatch, AssetStatus, ConditionStatus, Location, NewAsset},
    services::AssetService,
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Create,
    /// Editing the asset with this id
    Edit(String),
}

/// Form inputs, kept as entered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetFormFields {
    pub name: String,
    pub description: String,
    /// Empty means uncategorized
    pub category_id: String,
    pub serial_number: String,
    pub model: String,
    pub brand: String,
    pub purchase_date: String,
    pub purchase_price: String,
    pub supplier_vendor: String,
    pub warranty_start_date: String,
    pub warranty_end_date: String,
    pub warranty_details: String,
    pub location: Option<Location>,
    pub condition_status: ConditionStatus,
    pub asset_status: AssetStatus,
    pub notes: String,
}

impl Default for AssetFormFields {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            category_id: String::new(),
            serial_number: String::new(),
            model: String::new(),
            brand: String::new(),
            purchase_date: String::new(),
            purchase_price: String::new(),
            supplier_vendor: String::new(),
            warranty_start_date: String::new(),
            warranty_end_date: String::new(),
            warranty_details: String::new(),
            location: None,
            condition_status: ConditionStatus::Excellent,
            asset_status: AssetStatus::Active,
            notes: String::new(),
        }
    }
}

impl From<&Asset> for AssetFormFields {
    fn from(asset: &Asset) -> Self {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        let date = |value: Option<chrono::NaiveDate>| {
            value.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
        };
        Self {
            name: asset.name.clone(),
            description: text(&asset.description),
            category_id: text(&asset.category_id),
            serial_number: text(&asset.serial_number),
            model: text(&asset.model),
            brand: text(&asset.brand),
            purchase_date: date(asset.purchase_date),
            purchase_price: asset.purchase_price.map(|p| p.to_string()).unwrap_or_default(),
            supplier_vendor: text(&asset.supplier_vendor),
            warranty_start_date: date(asset.warranty_start_date),
            warranty_end_date: date(asset.warranty_end_date),
            warranty_details: text(&asset.warranty_details),
            location: Some(asset.location),
            condition_status: asset.condition_status,
            asset_status: asset.asset_status,
            notes: text(&asset.notes),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

impl AssetFormFields {
    fn price(&self) -> AppResult<Option<Decimal>> {
        let raw = self.purchase_price.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        Decimal::from_str(raw)
            .map(Some)
            .map_err(|_| AppError::Validation(format!("purchase_price: '{}' is not a number", raw)))
    }

    fn location(&self) -> AppResult<Location> {
        self.location
            .ok_or_else(|| AppError::Validation("location: must be selected".to_string()))
    }

    /// Empty text inputs are omitted. Dates stay raw so an empty one is sent
    /// as an explicit null.
    pub fn to_new_asset(&self) -> AppResult<NewAsset> {
        Ok(NewAsset {
            name: self.name.clone(),
            description: non_empty(&self.description),
            category_id: non_empty(&self.category_id),
            serial_number: non_empty(&self.serial_number),
            model: non_empty(&self.model),
            brand: non_empty(&self.brand),
            purchase_date: Some(self.purchase_date.clone()),
            purchase_price: self.price()?,
            supplier_vendor: non_empty(&self.supplier_vendor),
            warranty_start_date: Some(self.warranty_start_date.clone()),
            warranty_end_date: Some(self.warranty_end_date.clone()),
            warranty_details: non_empty(&self.warranty_details),
            location: self.location()?,
            condition_status: self.condition_status,
            asset_status: self.asset_status,
            notes: non_empty(&self.notes),
        })
    }

    /// Every field is sent so that cleared inputs overwrite stored values.
    pub fn to_patch(&self) -> AppResult<AssetPatch> {
        Ok(AssetPatch {
            name: Some(self.name.clone()),
            description: Some(self.description.clone()),
            category_id: Some(non_empty(&self.category_id)),
            serial_number: Some(self.serial_number.clone()),
            model: Some(self.model.clone()),
            brand: Some(self.brand.clone()),
            purchase_date: Some(self.purchase_date.clone()),
            purchase_price: Some(self.price()?),
            supplier_vendor: Some(self.supplier_vendor.clone()),
            warranty_start_date: Some(self.warranty_start_date.clone()),
            warranty_end_date: Some(self.warranty_end_date.clone()),
            warranty_details: Some(self.warranty_details.clone()),
            location: Some(self.location()?),
            condition_status: Some(self.condition_status),
            asset_status: Some(self.asset_status),
            notes: Some(self.notes.clone()),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct AssetForm {
    pub mode: FormMode,
    pub fields: AssetFormFields,
    /// Message of the last failed submission, shown inline
    pub error: Option<String>,
    pub submitting: bool,
}

impl AssetForm {
    pub fn create() -> Self {
        Self::default()
    }

    /// Edit form pre-filled from an existing asset
    pub fn from_asset(asset: &Asset) -> Self {
        Self {
            mode: FormMode::Edit(asset.id.clone()),
            fields: AssetFormFields::from(asset),
            error: None,
            submitting: false,
        }
    }

    /// Submit through the access layer. On failure the message is kept on
    /// the form and the inputs are left as they are; on success the inputs
    /// are reset.
    pub async fn submit(&mut self, assets: &AssetService) -> AppResult<Asset> {
        self.submitting = true;
        self.error = None;

        let result = match &self.mode {
            FormMode::Create => match self.fields.to_new_asset() {
                Ok(payload) => assets.create(&payload).await,
                Err(e) => Err(e),
            },
            FormMode::Edit(id) => match self.fields.to_patch() {
                Ok(patch) => assets.update(id, &patch).await,
                Err(e) => Err(e),
            },
        };

        self.submitting = false;
        match result {
            Ok(asset) => {
                self.fields = AssetFormFields::default();
                Ok(asset)
            }
            Err(e) => {
                tracing::debug!("Asset form submission failed: {}", e);
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{auth::StaticAuth, repository::MemoryStore};
    use std::sync::Arc;

    fn service(signed_in: bool) -> (Arc<MemoryStore>, AssetService) {
        let store = Arc::new(MemoryStore::new());
        let auth = if signed_in {
            StaticAuth::signed_in("user-1", "token")
        } else {
            StaticAuth::new(None)
        };
        let service = AssetService::new(store.clone(), Arc::new(auth));
        (store, service)
    }

    fn filled() -> AssetFormFields {
        AssetFormFields {
            name: "Generator".to_string(),
            purchase_price: "15000.50".to_string(),
            location: Some(Location::Limpopo),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults() {
        let form = AssetForm::create();
        assert_eq!(form.mode, FormMode::Create);
        assert_eq!(form.fields.condition_status, ConditionStatus::Excellent);
        assert_eq!(form.fields.asset_status, AssetStatus::Active);
    }

    #[test]
    fn test_to_new_asset() {
        let payload = filled().to_new_asset().unwrap();
        assert_eq!(payload.purchase_price, Some(Decimal::new(1500050, 2)));
        assert_eq!(payload.category_id, None);
        assert_eq!(payload.description, None);
        assert_eq!(payload.purchase_date.as_deref(), Some(""));

        let mut fields = filled();
        fields.purchase_price = "cheap".to_string();
        assert!(matches!(fields.to_new_asset(), Err(AppError::Validation(_))));

        fields = filled();
        fields.location = None;
        assert!(matches!(fields.to_new_asset(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_to_patch_detaches_empty_category() {
        let patch = filled().to_patch().unwrap();
        assert_eq!(patch.category_id, Some(None));
        assert_eq!(patch.location, Some(Location::Limpopo));
        assert_eq!(patch.notes.as_deref(), Some(""));
    }

    #[tokio::test]
    async fn test_submit_create_resets_on_success() {
        let (store, service) = service(true);
        let mut form = AssetForm::create();
        form.fields = filled();

        let asset = form.submit(&service).await.unwrap();
        assert_eq!(asset.name, "Generator");
        assert_eq!(form.fields, AssetFormFields::default());
        assert!(form.error.is_none());
        assert_eq!(store.all_assets().await.len(), 1);
    }

    #[tokio::test]
    async fn test_submit_keeps_inline_error() {
        let (_store, service) = service(false);
        let mut form = AssetForm::create();
        form.fields = filled();

        let err = form.submit(&service).await.unwrap_err();
        assert_eq!(err, AppError::NotAuthenticated);
        assert_eq!(form.error.as_deref(), Some("User not authenticated"));
        assert_eq!(form.fields.name, "Generator");
        assert!(!form.submitting);
    }

    #[tokio::test]
    async fn test_edit_round_trip() {
        let (_store, service) = service(true);
        let created = service
            .create(&NewAsset::new("Bakkie", Location::NorthWest))
            .await
            .unwrap();

        let mut form = AssetForm::from_asset(&created);
        assert_eq!(form.mode, FormMode::Edit(created.id.clone()));
        assert_eq!(form.fields.location, Some(Location::NorthWest));

        form.fields.name = "Bakkie 4x4".to_string();
        form.fields.warranty_end_date = "2026-01-31".to_string();
        let updated = form.submit(&service).await.unwrap();
        assert_eq!(updated.name, "Bakkie 4x4");
        assert_eq!(updated.warranty_end_date, chrono::NaiveDate::from_ymd_opt(2026, 1, 31));
    }

    #[tokio::test]
    async fn test_edit_clears_stored_price() {
        let (_store, service) = service(true);
        let mut payload = NewAsset::new("Welder", Location::EasternCape);
        payload.purchase_price = Some(Decimal::new(500, 0));
        let created = service.create(&payload).await.unwrap();

        let mut form = AssetForm::from_asset(&created);
        assert_eq!(form.fields.purchase_price, "500");
        form.fields.purchase_price = String::new();
        assert_eq!(form.fields.to_patch().unwrap().purchase_price, Some(None));

        let updated = form.submit(&service).await.unwrap();
        assert_eq!(updated.purchase_price, None);
        let details = service.get(&created.id).await.unwrap();
        assert_eq!(details.asset.purchase_price, None);
    }
}
