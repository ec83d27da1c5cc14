use contracts::domain::a001_product::aggregate::{Product, ProductDto};
use contracts::shared::EntityId;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a001_product::api;
use crate::shared::toast::ToastService;

/// Raw text of the form fields; numbers are parsed on save.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductForm {
    pub id: Option<EntityId>,
    pub sku: String,
    pub name: String,
    pub description: String,
    pub unit_price: String,
    pub unit: String,
    pub active: bool,
}

impl Default for ProductForm {
    fn default() -> Self {
        Self::from(ProductDto::default())
    }
}

impl From<ProductDto> for ProductForm {
    fn from(dto: ProductDto) -> Self {
        Self {
            id: dto.id,
            sku: dto.sku,
            name: dto.name,
            description: dto.description.unwrap_or_default(),
            unit_price: format!("{:.2}", dto.unit_price),
            unit: dto.unit,
            active: dto.active,
        }
    }
}

impl ProductForm {
    pub fn to_dto(&self) -> Result<ProductDto, String> {
        let unit_price = self
            .unit_price
            .trim()
            .replace(',', ".")
            .parse::<f64>()
            .map_err(|_| "Price must be a number".to_string())?;
        let description = self.description.trim();
        let dto = ProductDto {
            id: self.id,
            sku: self.sku.trim().to_string(),
            name: self.name.trim().to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            unit_price,
            unit: self.unit.trim().to_string(),
            active: self.active,
        };
        dto.validate()?;
        Ok(dto)
    }
}

#[derive(Clone, Copy)]
pub struct ProductDetailsViewModel {
    pub form: RwSignal<ProductForm>,
    pub error: RwSignal<Option<String>>,
    pub busy: RwSignal<bool>,
}

impl ProductDetailsViewModel {
    pub fn new() -> Self {
        Self {
            form: RwSignal::new(ProductForm::default()),
            error: RwSignal::new(None),
            busy: RwSignal::new(false),
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.form.with(|f| f.id.is_some())
    }

    /// Fetch the current version of an existing product.
    pub fn load(&self, id: EntityId) {
        let vm = *self;
        vm.busy.set(true);
        spawn_local(async move {
            match api::fetch_by_id(id).await {
                Ok(product) => vm.form.set(ProductDto::from(product).into()),
                Err(e) => vm.error.set(Some(e.user_message())),
            }
            vm.busy.set(false);
        });
    }

    pub fn save(&self, toast: ToastService, on_saved: Callback<Product>) {
        let dto = match self.form.with_untracked(ProductForm::to_dto) {
            Ok(dto) => dto,
            Err(msg) => {
                self.error.set(Some(msg));
                return;
            }
        };
        let vm = *self;
        vm.busy.set(true);
        vm.error.set(None);
        spawn_local(async move {
            match api::save(&dto).await {
                Ok(saved) => {
                    toast.success(format!("Product {} saved", saved.sku));
                    on_saved.run(saved);
                }
                Err(e) => {
                    vm.error.set(Some(e.user_message()));
                    toast.error(&e);
                }
            }
            vm.busy.set(false);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_parses_price_and_trims() {
        let form = ProductForm {
            id: None,
            sku: " SKU-1 ".into(),
            name: "Pallet".into(),
            description: "  ".into(),
            unit_price: "12,50".into(),
            unit: "pcs".into(),
            active: true,
        };
        let dto = form.to_dto().unwrap();
        assert_eq!(dto.sku, "SKU-1");
        assert_eq!(dto.unit_price, 12.5);
        assert_eq!(dto.description, None);
    }

    #[test]
    fn form_rejects_bad_price() {
        let form = ProductForm {
            sku: "A".into(),
            name: "B".into(),
            unit_price: "abc".into(),
            ..ProductForm::default()
        };
        assert_eq!(form.to_dto(), Err("Price must be a number".to_string()));
    }
}
