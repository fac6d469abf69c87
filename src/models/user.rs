use mongodb::bson::{self, Bson, Document};
use serde_json::{Map, Value};

/// One top-level field operation, derived once per request.
///
/// `Unset` covers both an explicit JSON `null` and an absent field: either
/// way the stored field is removed rather than overwritten with null.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    Set(Bson),
    Unset,
}

impl FieldUpdate {
    pub fn from_nullable(value: Option<Value>) -> Result<Self, bson::ser::Error> {
        match value {
            None | Some(Value::Null) => Ok(FieldUpdate::Unset),
            Some(value) => Ok(FieldUpdate::Set(bson::to_bson(&value)?)),
        }
    }
}

/// Accumulates `$set`/`$unset` clauses for a single update statement.
///
/// A shallow merge: only the named top-level fields are touched, everything
/// else in the stored document survives.
#[derive(Debug, Default)]
pub struct UserUpdate {
    set: Document,
    unset: Document,
}

impl UserUpdate {
    /// Seeds the `$set` clause with every top-level field of a request body.
    pub fn from_fields(fields: &Map<String, Value>) -> Result<Self, bson::ser::Error> {
        let mut update = UserUpdate::default();
        for (name, value) in fields {
            update.set_field(name, value)?;
        }
        Ok(update)
    }

    pub fn set_field(&mut self, name: &str, value: &Value) -> Result<(), bson::ser::Error> {
        self.set.insert(name, bson::to_bson(value)?);
        Ok(())
    }

    pub fn apply(&mut self, name: &str, op: FieldUpdate) {
        match op {
            FieldUpdate::Set(value) => {
                self.set.insert(name, value);
            }
            FieldUpdate::Unset => {
                // The assigned value is ignored by $unset; empty string
                // matches what the wire format expects.
                self.unset.insert(name, "");
            }
        }
    }

    /// Folds the clauses into one update document. Empty clauses are
    /// omitted; a fully empty update is rejected by the server and surfaces
    /// as a store error, same as the behavior this service replaces.
    pub fn into_document(self) -> Document {
        let mut update = Document::new();
        if !self.set.is_empty() {
            update.insert("$set", self.set);
        }
        if !self.unset.is_empty() {
            update.insert("$unset", self.unset);
        }
        update
    }
}
