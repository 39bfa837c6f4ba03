use kc_msgpack::{ArrClass, MapClass, Value};

use crate::error::CardError;

/// One entry in the block catalog: a block's name, schema version string,
/// and its byte range within the concatenated block-data section.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: String,
    pub version: String,
    pub pos: u64,
    pub size: u64,
}

/// Which on-disk shape the catalog was encoded as. Different variants
/// encode the catalog as either a `Map` or an `Array`-of-tuples;
/// re-encoding must reproduce whichever one was observed, so the shape
/// is a memo like the object codec's own tag classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CatalogShape {
    /// `{ name: [version, pos, size], ... }`
    Map(MapClass),
    /// `[ [name, version, pos, size], ... ]`
    Array(ArrClass),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockCatalog {
    pub shape: CatalogShape,
    pub entries: Vec<CatalogEntry>,
}

impl BlockCatalog {
    /// # Errors
    ///
    /// [`CardError::SchemaMismatch`] if `value` is neither a `Map` nor an
    /// `Array`, or an entry doesn't match the expected per-entry shape.
    pub fn decode(value: &Value) -> Result<Self, CardError> {
        match value {
            Value::Map(class, pairs) => {
                let mut entries = Vec::with_capacity(pairs.len());
                for (k, v) in pairs {
                    let name = k.as_str().ok_or(CardError::SchemaMismatch {
                        context: "catalog map key",
                        reason: "expected a string block name",
                    })?;
                    let (version, pos, size) = decode_entry_triple(v)?;
                    entries.push(CatalogEntry { name: name.to_string(), version, pos, size });
                }
                Ok(Self { shape: CatalogShape::Map(*class), entries })
            }
            Value::Array(class, items) => {
                let mut entries = Vec::with_capacity(items.len());
                for item in items {
                    let Value::Array(_, fields) = item else {
                        return Err(CardError::SchemaMismatch {
                            context: "catalog array entry",
                            reason: "expected a 4-tuple array",
                        });
                    };
                    let [name, version, pos, size] = &fields[..] else {
                        return Err(CardError::SchemaMismatch {
                            context: "catalog array entry",
                            reason: "expected exactly 4 fields",
                        });
                    };
                    let name = name.as_str().ok_or(CardError::SchemaMismatch {
                        context: "catalog array entry",
                        reason: "name field must be a string",
                    })?;
                    let version = version.as_str().ok_or(CardError::SchemaMismatch {
                        context: "catalog array entry",
                        reason: "version field must be a string",
                    })?;
                    let pos = as_u64(pos).ok_or(CardError::SchemaMismatch {
                        context: "catalog array entry",
                        reason: "pos field must be an integer",
                    })?;
                    let size = as_u64(size).ok_or(CardError::SchemaMismatch {
                        context: "catalog array entry",
                        reason: "size field must be an integer",
                    })?;
                    entries.push(CatalogEntry { name: name.to_string(), version: version.to_string(), pos, size });
                }
                Ok(Self { shape: CatalogShape::Array(*class), entries })
            }
            _ => Err(CardError::SchemaMismatch {
                context: "block catalog",
                reason: "expected a Map or Array value",
            }),
        }
    }

    #[must_use]
    pub fn encode(&self) -> Value {
        match self.shape {
            CatalogShape::Map(class) => {
                let pairs = self
                    .entries
                    .iter()
                    .map(|e| {
                        let triple = Value::array(vec![
                            Value::string(e.version.clone()),
                            Value::uint(e.pos),
                            Value::uint(e.size),
                        ]);
                        (Value::string(e.name.clone()), triple)
                    })
                    .collect();
                Value::Map(class, pairs)
            }
            CatalogShape::Array(class) => {
                let items = self
                    .entries
                    .iter()
                    .map(|e| {
                        Value::array(vec![
                            Value::string(e.name.clone()),
                            Value::string(e.version.clone()),
                            Value::uint(e.pos),
                            Value::uint(e.size),
                        ])
                    })
                    .collect();
                Value::Array(class, items)
            }
        }
    }
}

fn decode_entry_triple(v: &Value) -> Result<(String, u64, u64), CardError> {
    let Value::Array(_, fields) = v else {
        return Err(CardError::SchemaMismatch {
            context: "catalog map entry",
            reason: "expected a [version, pos, size] array value",
        });
    };
    let [version, pos, size] = &fields[..] else {
        return Err(CardError::SchemaMismatch {
            context: "catalog map entry",
            reason: "expected exactly 3 fields",
        });
    };
    let version = version.as_str().ok_or(CardError::SchemaMismatch {
        context: "catalog map entry",
        reason: "version field must be a string",
    })?;
    let pos = as_u64(pos).ok_or(CardError::SchemaMismatch {
        context: "catalog map entry",
        reason: "pos field must be an integer",
    })?;
    let size = as_u64(size).ok_or(CardError::SchemaMismatch {
        context: "catalog map entry",
        reason: "size field must be an integer",
    })?;
    Ok((version.to_string(), pos, size))
}

fn as_u64(v: &Value) -> Option<u64> {
    match v {
        Value::UInt(_, n) => Some(*n),
        Value::Int(_, n) if *n >= 0 => Some(*n as u64),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entries() -> Vec<CatalogEntry> {
        vec![
            CatalogEntry { name: "Custom".to_string(), version: "0.0.0".to_string(), pos: 0, size: 100 },
            CatalogEntry { name: "KKEx".to_string(), version: "1.0".to_string(), pos: 100, size: 50 },
        ]
    }

    #[test]
    fn roundtrip_map_shape() {
        let catalog = BlockCatalog { shape: CatalogShape::Map(MapClass::Fix), entries: sample_entries() };
        let value = catalog.encode();
        let decoded = BlockCatalog::decode(&value).unwrap();
        assert_eq!(decoded, catalog);
    }

    #[test]
    fn roundtrip_array_shape() {
        let catalog = BlockCatalog { shape: CatalogShape::Array(ArrClass::Fix), entries: sample_entries() };
        let value = catalog.encode();
        let decoded = BlockCatalog::decode(&value).unwrap();
        assert_eq!(decoded, catalog);
    }

    #[test]
    fn rejects_non_catalog_shape() {
        let err = BlockCatalog::decode(&Value::Null).unwrap_err();
        assert!(matches!(err, CardError::SchemaMismatch { .. }));
    }
}
