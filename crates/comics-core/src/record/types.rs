//! Record types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::{Ciudad, RecordId, TipoAliado, Timestamp};

/// Allies of a character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aliados {
    /// Names of the allies, at least one.
    pub nombre: Vec<String>,
    /// What kind of allies they are.
    pub tipo: TipoAliado,
}

/// A stored character record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub nombre: String,
    pub edad: i64,
    pub ciudad: Ciudad,
    pub poderes: Vec<String>,
    pub aliados: Aliados,
    pub enemigos: Vec<String>,
    pub primera_aparicion: String,
    pub hobbies: Vec<String>,
    pub activo: bool,

    /// Set on creation and on every update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,

    /// Absent until the bulk stamp back-fills it; never overwritten after.
    ///
    /// A stored `null` reads as absent and is written back without the key,
    /// so `{"updated_at": null}` and a missing key are the same document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,

    /// Fields outside the schema, carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A validated candidate for creation.
///
/// Produced by [`SchemaValidator::validate_new`](crate::SchemaValidator::validate_new);
/// carries no identity or timestamps, those belong to the repository.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewRecord {
    pub nombre: String,
    pub edad: i64,
    pub ciudad: Ciudad,
    pub poderes: Vec<String>,
    pub aliados: Aliados,
    pub enemigos: Vec<String>,
    pub primera_aparicion: String,
    pub hobbies: Vec<String>,
    pub activo: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NewRecord {
    /// Attach identity and creation time.
    pub fn into_record(self, id: RecordId, created_at: Timestamp) -> Record {
        Record {
            id,
            nombre: self.nombre,
            edad: self.edad,
            ciudad: self.ciudad,
            poderes: self.poderes,
            aliados: self.aliados,
            enemigos: self.enemigos,
            primera_aparicion: self.primera_aparicion,
            hobbies: self.hobbies,
            activo: self.activo,
            created_at: Some(created_at),
            updated_at: None,
            extra: self.extra,
        }
    }
}

/// A validated partial update.
///
/// Produced by [`SchemaValidator::validate_patch`](crate::SchemaValidator::validate_patch).
/// `None` means "keep the stored value".
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RecordPatch {
    pub nombre: Option<String>,
    pub edad: Option<i64>,
    pub ciudad: Option<Ciudad>,
    pub poderes: Option<Vec<String>>,
    pub aliados: Option<Aliados>,
    pub enemigos: Option<Vec<String>>,
    pub primera_aparicion: Option<String>,
    pub hobbies: Option<Vec<String>>,
    pub activo: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RecordPatch {
    /// Shallow merge into `record`. `aliados` is replaced whole.
    pub fn apply_to(self, record: &mut Record) {
        fn set<T>(slot: &mut T, value: Option<T>) {
            if let Some(value) = value {
                *slot = value;
            }
        }

        set(&mut record.nombre, self.nombre);
        set(&mut record.edad, self.edad);
        set(&mut record.ciudad, self.ciudad);
        set(&mut record.poderes, self.poderes);
        set(&mut record.aliados, self.aliados);
        set(&mut record.enemigos, self.enemigos);
        set(&mut record.primera_aparicion, self.primera_aparicion);
        set(&mut record.hobbies, self.hobbies);
        set(&mut record.activo, self.activo);
        record.extra.extend(self.extra);
    }
}
