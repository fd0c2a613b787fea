//! Product create/edit form.
//!
//! Holds the raw text of every field, validates a field when focus leaves it
//! and all fields on submit. A valid submit produces the worker request and
//! locks the form until the store answers; the product list is only touched
//! once the store reports success.

use crate::domain::{
    brands_for, check_field, parse_price, parse_stock, Product, ProductDraft, ProductField, ProductStatus,
    CATEGORIES,
};
use crate::worker::WorkerMessage;
use std::collections::BTreeMap;

/// Whether the form adds a product or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: String },
}

#[derive(Debug, Clone)]
pub struct ProductForm {
    mode: FormMode,
    values: BTreeMap<ProductField, String>,
    errors: BTreeMap<ProductField, &'static str>,
    status: ProductStatus,
    focus: usize,
    saving: bool,
    /// Last store failure, shown above the fields.
    save_error: Option<String>,
}

impl ProductForm {
    /// An empty form for a new product. Status starts as "In Stock".
    #[must_use]
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            values: ProductField::ALL
                .into_iter()
                .filter(|f| f.is_text() || *f == ProductField::Category)
                .map(|f| (f, String::new()))
                .collect(),
            errors: BTreeMap::new(),
            status: ProductStatus::InStock,
            focus: 0,
            saving: false,
            save_error: None,
        }
    }

    /// A form pre-filled from `product`.
    #[must_use]
    pub fn edit(product: &Product) -> Self {
        let mut form = Self::create();
        form.mode = FormMode::Edit {
            id: product.id.clone(),
        };
        form.status = product.status;
        for (field, value) in [
            (ProductField::Name, product.name.clone()),
            (ProductField::Description, product.description.clone()),
            (ProductField::Price, format!("{:.2}", product.price)),
            (ProductField::Stock, product.stock.to_string()),
            (ProductField::Category, product.category.clone()),
            (ProductField::Brand, product.brand.clone()),
            (ProductField::Image, product.image.clone()),
        ] {
            form.values.insert(field, value);
        }
        form
    }

    /// Whether the form adds a product or edits one.
    #[must_use]
    pub const fn mode(&self) -> &FormMode {
        &self.mode
    }

    /// True while a save is in flight. Input is ignored meanwhile.
    #[must_use]
    pub const fn is_saving(&self) -> bool {
        self.saving
    }

    /// Field that receives typing.
    #[must_use]
    pub fn focused(&self) -> ProductField {
        ProductField::ALL[self.focus]
    }

    /// Display value of `field`.
    #[must_use]
    pub fn value(&self, field: ProductField) -> &str {
        if field == ProductField::Status {
            return self.status.as_str();
        }
        self.values.get(&field).map_or("", String::as_str)
    }

    /// Validation message currently shown under `field`.
    #[must_use]
    pub fn error(&self, field: ProductField) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    /// Message from the last failed save, if any.
    #[must_use]
    pub fn save_error(&self) -> Option<&str> {
        self.save_error.as_deref()
    }

    /// Heading shown above the form.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Add New Product",
            FormMode::Edit { .. } => "Edit Product",
        }
    }

    fn validate(&mut self, field: ProductField) -> bool {
        match check_field(field, self.value(field)) {
            Ok(()) => {
                self.errors.remove(&field);
                true
            }
            Err(message) => {
                self.errors.insert(field, message);
                false
            }
        }
    }

    fn move_focus(&mut self, forward: bool) {
        if self.saving {
            return;
        }
        self.validate(self.focused());
        let len = ProductField::ALL.len();
        self.focus = if forward {
            (self.focus + 1) % len
        } else {
            (self.focus + len - 1) % len
        };
    }

    /// Moves to the next field, validating the one being left.
    pub fn focus_next(&mut self) {
        self.move_focus(true);
    }

    /// Moves to the previous field, validating the one being left.
    pub fn focus_prev(&mut self) {
        self.move_focus(false);
    }

    /// Types `c` into the focused text field and clears its error.
    pub fn push_char(&mut self, c: char) {
        let field = self.focused();
        if self.saving || !field.is_text() || c.is_control() {
            return;
        }
        self.values.entry(field).or_default().push(c);
        self.errors.remove(&field);
    }

    /// Deletes the last character of the focused text field.
    pub fn pop_char(&mut self) {
        let field = self.focused();
        if self.saving || !field.is_text() {
            return;
        }
        if let Some(value) = self.values.get_mut(&field) {
            value.pop();
        }
        self.errors.remove(&field);
    }

    /// Steps the focused choice field through its options.
    ///
    /// Category walks the catalogue categories and Status toggles. Brand, a
    /// text field, steps through the brands suggested for the chosen category
    /// so the user can either pick one or type their own.
    pub fn cycle_choice(&mut self, forward: bool) {
        if self.saving {
            return;
        }
        let field = self.focused();
        match field {
            ProductField::Status => {
                self.status = match self.status {
                    ProductStatus::InStock => ProductStatus::OutOfStock,
                    ProductStatus::OutOfStock => ProductStatus::InStock,
                };
            }
            ProductField::Category => {
                let names: Vec<&str> = CATEGORIES.iter().map(|(name, _)| *name).collect();
                let next = step(&names, self.value(field), forward);
                self.values.insert(field, next.to_string());
                self.errors.remove(&field);
            }
            ProductField::Brand => {
                let brands = brands_for(self.value(ProductField::Category));
                if brands.is_empty() {
                    return;
                }
                let next = step(brands, self.value(field), forward);
                self.values.insert(field, next.to_string());
                self.errors.remove(&field);
            }
            _ => {}
        }
    }

    /// Validates every field and, if all pass, locks the form and returns the
    /// request to send.
    ///
    /// # Returns
    ///
    /// `None` while a save is in flight or when a field is invalid. Focus then
    /// moves to the first invalid field.
    pub fn submit(&mut self) -> Option<WorkerMessage> {
        if self.saving {
            return None;
        }
        let mut first_invalid = None;
        for (index, field) in ProductField::ALL.into_iter().enumerate() {
            if !self.validate(field) && first_invalid.is_none() {
                first_invalid = Some(index);
            }
        }
        if let Some(index) = first_invalid {
            self.focus = index;
            tracing::debug!(errors = self.errors.len(), "product form rejected");
            return None;
        }

        let draft = self.draft()?;
        self.saving = true;
        self.save_error = None;
        Some(match &self.mode {
            FormMode::Create => WorkerMessage::create_product(draft),
            FormMode::Edit { id } => WorkerMessage::update_product(id.clone(), draft),
        })
    }

    fn draft(&self) -> Option<ProductDraft> {
        Some(ProductDraft {
            name: self.value(ProductField::Name).trim().to_string(),
            description: self.value(ProductField::Description).trim().to_string(),
            price: parse_price(self.value(ProductField::Price))?,
            stock: parse_stock(self.value(ProductField::Stock))?,
            image: self.value(ProductField::Image).trim().to_string(),
            category: self.value(ProductField::Category).trim().to_string(),
            brand: self.value(ProductField::Brand).trim().to_string(),
            status: self.status,
        })
    }

    /// Whether a save result for product `id` (`None` for a create) is ours.
    #[must_use]
    pub fn awaits(&self, id: Option<&str>) -> bool {
        self.saving
            && match (&self.mode, id) {
                (FormMode::Create, None) => true,
                (FormMode::Edit { id: mine }, Some(id)) => mine == id,
                _ => false,
            }
    }

    /// The store refused the save; unlock the form and show why.
    pub fn save_failed(&mut self, message: &str) {
        self.saving = false;
        self.save_error = Some(message.to_string());
    }
}

/// The option after (or before) `current`, wrapping. From an unknown value
/// forward lands on the first option and backward on the last.
fn step<'a>(options: &[&'a str], current: &str, forward: bool) -> &'a str {
    let len = options.len();
    let next = match options.iter().position(|o| *o == current) {
        Some(i) if forward => (i + 1) % len,
        Some(i) => (i + len - 1) % len,
        None if forward => 0,
        None => len - 1,
    };
    options[next]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::seed;

    fn type_text(form: &mut ProductForm, text: &str) {
        text.chars().for_each(|c| form.push_char(c));
    }

    fn focus(form: &mut ProductForm, field: ProductField) {
        while form.focused() != field {
            form.focus_next();
        }
    }

    fn filled() -> ProductForm {
        let mut form = ProductForm::create();
        type_text(&mut form, "Desk Lamp");
        form.focus_next();
        type_text(&mut form, "Adjustable LED lamp");
        form.focus_next();
        type_text(&mut form, "34.50");
        form.focus_next();
        type_text(&mut form, "12");
        form.focus_next();
        form.cycle_choice(true);
        form.focus_next();
        form.cycle_choice(true);
        form
    }

    #[test]
    fn empty_submit_flags_every_required_field() {
        let mut form = ProductForm::create();
        assert!(form.submit().is_none());
        assert!(!form.is_saving());

        assert_eq!(form.error(ProductField::Name), Some("Product name is required"));
        assert_eq!(form.error(ProductField::Description), Some("Description is required"));
        assert_eq!(form.error(ProductField::Price), Some("Valid price is required"));
        assert_eq!(form.error(ProductField::Stock), Some("Valid stock quantity is required"));
        assert_eq!(form.error(ProductField::Category), Some("Category is required"));
        assert_eq!(form.error(ProductField::Brand), Some("Brand is required"));
        assert_eq!(form.error(ProductField::Image), None);
        assert_eq!(form.focused(), ProductField::Name);
    }

    #[test]
    fn leaving_a_field_validates_it() {
        let mut form = ProductForm::create();
        focus(&mut form, ProductField::Price);
        type_text(&mut form, "0");
        form.focus_next();
        assert_eq!(form.error(ProductField::Price), Some("Valid price is required"));

        form.focus_prev();
        form.pop_char();
        assert_eq!(form.error(ProductField::Price), None);
        type_text(&mut form, "9.99");
        form.focus_next();
        assert_eq!(form.error(ProductField::Price), None);

        type_text(&mut form, "-2");
        form.focus_next();
        assert_eq!(form.error(ProductField::Stock), Some("Valid stock quantity is required"));
    }

    #[test]
    fn valid_submit_locks_the_form_and_builds_a_create() {
        let mut form = filled();
        let message = form.submit().unwrap();
        match message {
            WorkerMessage::CreateProduct { draft, .. } => {
                assert_eq!(draft.name, "Desk Lamp");
                assert_eq!(draft.price, 34.5);
                assert_eq!(draft.stock, 12);
                assert_eq!(draft.category, "Electronics");
                assert_eq!(draft.brand, "Apple");
                assert_eq!(draft.status, ProductStatus::InStock);
            }
            other => panic!("unexpected message: {other:?}"),
        }

        assert!(form.is_saving());
        assert!(form.awaits(None));
        assert!(form.submit().is_none());
        form.push_char('x');
        assert_eq!(form.value(ProductField::Brand), "Apple");

        form.save_failed("disk full");
        assert!(!form.is_saving());
        assert_eq!(form.save_error(), Some("disk full"));
    }

    #[test]
    fn edit_prefills_and_targets_the_product() {
        let product = seed::demo_data().unwrap().products.remove(0);
        let mut form = ProductForm::edit(&product);
        assert_eq!(form.title(), "Edit Product");
        assert_eq!(form.value(ProductField::Name), product.name);
        assert_eq!(form.value(ProductField::Brand), "TechPro");

        focus(&mut form, ProductField::Status);
        form.cycle_choice(true);
        match form.submit().unwrap() {
            WorkerMessage::UpdateProduct { id, draft, .. } => {
                assert_eq!(id, product.id);
                assert_eq!(draft.status, ProductStatus::OutOfStock);
                assert_eq!(draft.brand, "TechPro");
            }
            other => panic!("unexpected message: {other:?}"),
        }
        assert!(form.awaits(Some(&product.id)));
        assert!(!form.awaits(None));
    }

    #[test]
    fn choice_fields_wrap_and_ignore_typing() {
        let mut form = ProductForm::create();
        focus(&mut form, ProductField::Category);
        form.push_char('x');
        assert_eq!(form.value(ProductField::Category), "");
        form.cycle_choice(false);
        assert_eq!(form.value(ProductField::Category), "Toys");
        form.cycle_choice(true);
        assert_eq!(form.value(ProductField::Category), "Electronics");
        form.cycle_choice(false);
        assert_eq!(form.value(ProductField::Category), "Toys");

        form.focus_next();
        form.cycle_choice(true);
        assert_eq!(form.value(ProductField::Brand), "LEGO");
    }
}
