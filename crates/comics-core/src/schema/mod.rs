//! The comic character rule set.
//!
//! Candidates arrive as raw JSON. The validator checks every known field,
//! converts lenient inputs (numeric strings, `"true"`/`"false"`), passes
//! unknown top-level fields through and discards the fields the repository
//! owns (`id`, `created_at`, `updated_at`).
//!
//! Messages take the form `"<path>" <problem>`, for example
//! `"aliados.tipo" must be one of [Humanos, Extraterrestres, Animales]`.

mod rules;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ValidationError;
use crate::record::{NewRecord, RecordPatch};
use crate::types::{Ciudad, TipoAliado};

use rules::{Checker, Field, Presence, Rule};

/// How many messages a rejected candidate reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Stop at the first failing field.
    #[default]
    FailFast,
    /// Check every field and report all failures.
    CollectAll,
}

static NAME: Rule = Rule::Str { min: 3, max: 50 };

static ALIADOS: [Field; 2] = [
    Field::new(
        "nombre",
        Rule::List {
            min_items: 1,
            item: &NAME,
        },
    ),
    Field::new("tipo", Rule::OneOf(TipoAliado::NAMES)),
];

static COMIC: [Field; 9] = [
    Field::new("nombre", Rule::Str { min: 3, max: 50 }),
    Field::new("edad", Rule::Int { min: 18, max: 150 }),
    Field::new("ciudad", Rule::OneOf(Ciudad::NAMES)),
    Field::new(
        "poderes",
        Rule::List {
            min_items: 1,
            item: &NAME,
        },
    ),
    Field::new("aliados", Rule::Object(&ALIADOS)),
    Field::new(
        "enemigos",
        Rule::List {
            min_items: 1,
            item: &NAME,
        },
    ),
    Field::new("primera_aparicion", Rule::Str { min: 3, max: 50 }),
    Field::new(
        "hobbies",
        Rule::List {
            min_items: 1,
            item: &NAME,
        },
    ),
    Field::new("activo", Rule::Bool),
];

/// Fields assigned by the repository; client values are dropped.
const OWNED: &[&str] = &["id", "created_at", "updated_at"];

/// Validates candidates and patches against the comic rule set.
#[derive(Debug, Clone, Copy)]
pub struct SchemaValidator {
    fields: &'static [Field],
}

impl Default for SchemaValidator {
    fn default() -> Self {
        Self { fields: &COMIC }
    }
}

impl SchemaValidator {
    /// Validate a creation candidate. Every field is required.
    pub fn validate_new(
        &self,
        candidate: &Value,
        mode: ValidationMode,
    ) -> Result<NewRecord, ValidationError> {
        self.run(candidate, mode, Presence::Required)
    }

    /// Validate a patch. Present fields must satisfy their full rule,
    /// absent top-level fields are allowed.
    pub fn validate_patch(
        &self,
        patch: &Value,
        mode: ValidationMode,
    ) -> Result<RecordPatch, ValidationError> {
        self.run(patch, mode, Presence::Optional)
    }

    fn run<T: DeserializeOwned>(
        &self,
        value: &Value,
        mode: ValidationMode,
        presence: Presence,
    ) -> Result<T, ValidationError> {
        let mut checker = Checker::new(mode);
        match checker.check_root(self.fields, OWNED, presence, value) {
            Some(normalized) => serde_json::from_value(Value::Object(normalized))
                .map_err(|e| ValidationError::new(vec![e.to_string()])),
            None => Err(ValidationError::new(checker.into_messages())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bruce() -> Value {
        json!({
            "nombre": "Bruce Wayne",
            "edad": 35,
            "ciudad": "Gotham",
            "poderes": ["riqueza"],
            "aliados": {"nombre": ["Alfred"], "tipo": "Humanos"},
            "enemigos": ["Joker"],
            "primera_aparicion": "Detective Comics 27",
            "hobbies": ["detective"],
            "activo": true
        })
    }

    fn messages(result: Result<NewRecord, ValidationError>) -> Vec<String> {
        result.unwrap_err().messages().to_vec()
    }

    #[test]
    fn test_valid_candidate() {
        let record = SchemaValidator::default()
            .validate_new(&bruce(), ValidationMode::FailFast)
            .unwrap();
        assert_eq!(record.nombre, "Bruce Wayne");
        assert_eq!(record.ciudad, Ciudad::Gotham);
        assert_eq!(record.aliados.tipo, TipoAliado::Humanos);
        assert!(record.extra.is_empty());
    }

    #[test]
    fn test_unknown_fields_pass_through() {
        let mut candidate = bruce();
        candidate["alias"] = json!("Batman");
        let record = SchemaValidator::default()
            .validate_new(&candidate, ValidationMode::FailFast)
            .unwrap();
        assert_eq!(record.extra.get("alias"), Some(&json!("Batman")));
    }

    #[test]
    fn test_owned_fields_are_dropped() {
        let mut candidate = bruce();
        candidate["id"] = json!(99);
        candidate["created_at"] = json!("1999-01-01 00:00");
        candidate["updated_at"] = json!("1999-01-01 00:00");
        let record = SchemaValidator::default()
            .validate_new(&candidate, ValidationMode::FailFast)
            .unwrap();
        assert!(record.extra.is_empty());
    }

    #[test]
    fn test_fail_fast_reports_first_error() {
        let mut candidate = bruce();
        candidate["nombre"] = json!("Al");
        candidate["edad"] = json!(12);
        let msgs = messages(
            SchemaValidator::default().validate_new(&candidate, ValidationMode::FailFast),
        );
        assert_eq!(
            msgs,
            vec!["\"nombre\" length must be at least 3 characters long".to_string()]
        );
    }

    #[test]
    fn test_collect_all_reports_every_error() {
        let mut candidate = bruce();
        candidate["nombre"] = json!("Al");
        candidate["edad"] = json!(151);
        candidate["ciudad"] = json!("Springfield");
        let msgs = messages(
            SchemaValidator::default().validate_new(&candidate, ValidationMode::CollectAll),
        );
        assert_eq!(
            msgs,
            vec![
                "\"nombre\" length must be at least 3 characters long".to_string(),
                "\"edad\" must be less than or equal to 150".to_string(),
                "\"ciudad\" must be one of [Gotham, Metropolis, Otro]".to_string(),
            ]
        );
    }

    #[test]
    fn test_missing_fields_required_on_create() {
        let msgs = messages(
            SchemaValidator::default().validate_new(&json!({}), ValidationMode::CollectAll),
        );
        assert_eq!(msgs.len(), 9);
        assert_eq!(msgs[0], "\"nombre\" is required");
        assert_eq!(msgs[8], "\"activo\" is required");
    }

    #[test]
    fn test_list_item_paths() {
        let mut candidate = bruce();
        candidate["poderes"] = json!(["vuelo", "x"]);
        candidate["enemigos"] = json!([]);
        let msgs = messages(
            SchemaValidator::default().validate_new(&candidate, ValidationMode::CollectAll),
        );
        assert_eq!(
            msgs,
            vec![
                "\"poderes[1]\" length must be at least 3 characters long".to_string(),
                "\"enemigos\" must contain at least 1 items".to_string(),
            ]
        );
    }

    #[test]
    fn test_nested_aliados() {
        let mut candidate = bruce();
        candidate["aliados"] = json!({"nombre": ["Alfred"], "tipo": "Robots", "extra": 1});
        let msgs = messages(
            SchemaValidator::default().validate_new(&candidate, ValidationMode::CollectAll),
        );
        assert_eq!(
            msgs,
            vec![
                "\"aliados.tipo\" must be one of [Humanos, Extraterrestres, Animales]"
                    .to_string(),
                "\"aliados.extra\" is not allowed".to_string(),
            ]
        );
    }

    #[test]
    fn test_lenient_conversion() {
        let mut candidate = bruce();
        candidate["edad"] = json!("40");
        candidate["activo"] = json!("false");
        let record = SchemaValidator::default()
            .validate_new(&candidate, ValidationMode::FailFast)
            .unwrap();
        assert_eq!(record.edad, 40);
        assert!(!record.activo);
    }

    #[test]
    fn test_type_errors() {
        let mut candidate = bruce();
        candidate["edad"] = json!(35.5);
        candidate["activo"] = json!("yes");
        candidate["poderes"] = json!("vuelo");
        let msgs = messages(
            SchemaValidator::default().validate_new(&candidate, ValidationMode::CollectAll),
        );
        assert_eq!(
            msgs,
            vec![
                "\"edad\" must be an integer".to_string(),
                "\"poderes\" must be an array".to_string(),
                "\"activo\" must be a boolean".to_string(),
            ]
        );
    }

    #[test]
    fn test_not_an_object() {
        let msgs = messages(
            SchemaValidator::default().validate_new(&json!([1, 2]), ValidationMode::FailFast),
        );
        assert_eq!(msgs, vec!["\"value\" must be of type object".to_string()]);
    }

    #[test]
    fn test_patch_allows_omitted_fields() {
        let patch = SchemaValidator::default()
            .validate_patch(&json!({"activo": false}), ValidationMode::CollectAll)
            .unwrap();
        assert_eq!(patch.activo, Some(false));
        assert!(patch.nombre.is_none());
    }

    #[test]
    fn test_patch_checks_present_fields() {
        let err = SchemaValidator::default()
            .validate_patch(
                &json!({"edad": 5, "aliados": {"nombre": ["Robin"]}}),
                ValidationMode::CollectAll,
            )
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "\"edad\" must be greater than or equal to 18, \"aliados.tipo\" is required"
        );
    }

    #[test]
    fn test_patch_rejects_null() {
        let err = SchemaValidator::default()
            .validate_patch(&json!({"nombre": null}), ValidationMode::CollectAll)
            .unwrap_err();
        assert_eq!(err.messages(), ["\"nombre\" must be a string".to_string()]);
    }
}
