//! Mapping between form controls and the saved `FieldMap`.

use contracts::shared::autosave::{FieldMap, FieldValue, ItemRow, ITEM_ROWS_KEY};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlKind {
    Text,
    Checkbox,
    Radio,
    MultiSelect,
    /// `button` and `submit`; never saved
    Button,
}

impl ControlKind {
    /// From the DOM `type` property of a form control
    pub fn from_type(control_type: &str) -> Self {
        match control_type {
            "checkbox" => ControlKind::Checkbox,
            "radio" => ControlKind::Radio,
            "select-multiple" => ControlKind::MultiSelect,
            "button" | "submit" => ControlKind::Button,
            _ => ControlKind::Text,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub selected: bool,
}

/// Snapshot of one entry of `form.elements`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormControl {
    pub name: String,
    pub kind: ControlKind,
    pub value: String,
    pub checked: bool,
    pub options: Vec<SelectOption>,
}

impl FormControl {
    pub fn new(name: &str, kind: ControlKind, value: &str) -> Self {
        Self {
            name: name.to_string(),
            kind,
            value: value.to_string(),
            checked: false,
            options: Vec::new(),
        }
    }

    pub fn text(name: &str, value: &str) -> Self {
        Self::new(name, ControlKind::Text, value)
    }

    pub fn checkbox(name: &str, value: &str, checked: bool) -> Self {
        Self {
            checked,
            ..Self::new(name, ControlKind::Checkbox, value)
        }
    }

    pub fn radio(name: &str, value: &str, checked: bool) -> Self {
        Self {
            checked,
            ..Self::new(name, ControlKind::Radio, value)
        }
    }

    pub fn multi_select(name: &str, options: &[(&str, bool)]) -> Self {
        Self {
            options: options
                .iter()
                .map(|(value, selected)| SelectOption {
                    value: value.to_string(),
                    selected: *selected,
                })
                .collect(),
            ..Self::new(name, ControlKind::MultiSelect, "")
        }
    }

    fn captured_value(&self) -> Option<FieldValue> {
        match self.kind {
            ControlKind::Button => None,
            ControlKind::Checkbox | ControlKind::Radio => self
                .checked
                .then(|| FieldValue::Single(self.value.clone())),
            ControlKind::MultiSelect => Some(FieldValue::Multiple(
                self.options
                    .iter()
                    .filter(|o| o.selected)
                    .map(|o| o.value.clone())
                    .collect(),
            )),
            ControlKind::Text => Some(FieldValue::Single(self.value.clone())),
        }
    }

    fn restore_update(&self, saved: &FieldValue) -> Option<ControlUpdate> {
        match self.kind {
            ControlKind::Button => None,
            ControlKind::Checkbox | ControlKind::Radio => {
                Some(ControlUpdate::Checked(saved.matches(&self.value)))
            }
            ControlKind::MultiSelect => Some(ControlUpdate::Selection(
                self.options.iter().map(|o| saved.contains(&o.value)).collect(),
            )),
            ControlKind::Text => Some(ControlUpdate::Value(saved.to_value_string())),
        }
    }
}

/// The `item_name*` / `item_price*` / `item_quantity*` fields found in one `.item-row`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RowFields {
    pub name: Option<String>,
    pub price: Option<String>,
    pub quantity: Option<String>,
}

impl RowFields {
    pub fn complete(name: &str, price: &str, quantity: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            price: Some(price.to_string()),
            quantity: Some(quantity.to_string()),
        }
    }

    /// None when any of the three fields is missing from the row
    pub fn to_item(&self) -> Option<ItemRow> {
        Some(ItemRow {
            name: self.name.clone()?,
            price: self.price.clone()?,
            quantity: self.quantity.clone()?,
        })
    }
}

/// Change applied to a control during restore
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControlUpdate {
    Checked(bool),
    Value(String),
    /// Selected flag per option, in option order
    Selection(Vec<bool>),
}

/// Builds the saved map from the form's controls and the page's item rows.
/// `item_rows` is set whenever the page has item rows, even if none were complete.
/// A control named `item_rows` is never saved; the key is reserved for the rows.
pub fn capture(controls: &[FormControl], rows: &[RowFields]) -> FieldMap {
    let mut data = FieldMap::new();
    for control in controls
        .iter()
        .filter(|c| !c.name.is_empty() && c.name != ITEM_ROWS_KEY)
    {
        if let Some(value) = control.captured_value() {
            data.insert(&control.name, value);
        }
    }
    if !rows.is_empty() {
        data.item_rows = Some(rows.iter().filter_map(RowFields::to_item).collect());
    }
    data
}

/// Updates that put saved values back, as (index into `controls`, update)
pub fn plan_restore(controls: &[FormControl], data: &FieldMap) -> Vec<(usize, ControlUpdate)> {
    controls
        .iter()
        .enumerate()
        .filter_map(|(index, control)| {
            let saved = data.get(&control.name)?;
            control.restore_update(saved).map(|update| (index, update))
        })
        .collect()
}

/// Applies one update to a control snapshot
pub fn apply_update(control: &mut FormControl, update: &ControlUpdate) {
    match update {
        ControlUpdate::Checked(checked) => control.checked = *checked,
        ControlUpdate::Value(value) => control.value = value.clone(),
        ControlUpdate::Selection(selected) => {
            for (option, selected) in control.options.iter_mut().zip(selected) {
                option.selected = *selected;
            }
        }
    }
}
