//! Book entity and the wire codec for the backend's string-typed JSON.
//!
//! The backend encodes every numeric field as a string (`"id": "42"`,
//! `"preco": "39.90"`). In memory we keep proper numeric types and convert
//! at the serde boundary, so the rest of the app never re-parses strings.

use serde::{Deserialize, Serialize};

/// A catalog record as held in memory.
///
/// Field names on the wire follow the backend contract (`titulo`, `autores`,
/// ...); numeric fields are string-encoded there and typed here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    #[serde(with = "wire::int_string")]
    pub id: u64,
    #[serde(rename = "titulo")]
    pub title: String,
    /// Free-text author list, exactly as entered ("A. Author, B. Author").
    #[serde(rename = "autores")]
    pub authors: String,
    #[serde(rename = "ano_lancamento")]
    pub release_year: String,
    #[serde(rename = "genero")]
    pub genre: String,
    #[serde(rename = "sinopse")]
    pub synopsis: String,
    #[serde(rename = "avaliacao", with = "wire::f32_string")]
    pub rating: f32,
    #[serde(rename = "preco", with = "wire::f64_string")]
    pub price: f64,
    /// Externally hosted cover image, rendered as-is (no reachability check).
    #[serde(rename = "imagem_capa")]
    pub cover_url: String,
}

/// Form-bound in-progress record.
///
/// Every field is kept exactly as typed by the user and sent verbatim on the
/// wire - the backend stays the sole authority on validity. The `id` is
/// omitted from the payload while empty (create) and included once set
/// (edit).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BookDraft {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "autores")]
    pub authors: String,
    #[serde(rename = "ano_lancamento")]
    pub release_year: String,
    #[serde(rename = "genero")]
    pub genre: String,
    #[serde(rename = "sinopse")]
    pub synopsis: String,
    #[serde(rename = "avaliacao")]
    pub rating: String,
    #[serde(rename = "preco")]
    pub price: String,
    #[serde(rename = "imagem_capa")]
    pub cover_url: String,
}

impl BookDraft {
    /// Pre-populate the form from an existing record (edit flow).
    pub fn from_book(book: &Book) -> Self {
        Self {
            id: book.id.to_string(),
            title: book.title.clone(),
            authors: book.authors.clone(),
            release_year: book.release_year.clone(),
            genre: book.genre.clone(),
            synopsis: book.synopsis.clone(),
            rating: book.rating.to_string(),
            price: book.price.to_string(),
            cover_url: book.cover_url.clone(),
        }
    }

    /// Reset all fields (add flow opens with a blank form).
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Identifier of the record being edited, if the draft has one.
    pub fn parsed_id(&self) -> Option<u64> {
        self.id.trim().parse().ok()
    }
}

/// Serde bridges between typed numeric fields and the backend's strings.
///
/// Empty strings decode to zero (the backend stores free text and the
/// original UI displayed `""` as 0); any other non-numeric content is a
/// deserialization error, surfaced through the normal failure path.
mod wire {
    use serde::{Deserialize, Deserializer, Serializer, de};
    use std::fmt::Display;
    use std::str::FromStr;

    fn to_wire<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Display,
        S: Serializer,
    {
        serializer.collect_str(value)
    }

    fn from_wire<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: FromStr + Default,
        T::Err: Display,
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(T::default());
        }
        raw.parse()
            .map_err(|e| de::Error::custom(format!("invalid numeric field {raw:?}: {e}")))
    }

    pub mod int_string {
        use serde::{Deserializer, Serializer};

        pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
            super::to_wire(value, serializer)
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
            super::from_wire(deserializer)
        }
    }

    pub mod f32_string {
        use serde::{Deserializer, Serializer};

        pub fn serialize<S: Serializer>(value: &f32, serializer: S) -> Result<S::Ok, S::Error> {
            super::to_wire(value, serializer)
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f32, D::Error> {
            super::from_wire(deserializer)
        }
    }

    pub mod f64_string {
        use serde::{Deserializer, Serializer};

        pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
            super::to_wire(value, serializer)
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
            super::from_wire(deserializer)
        }
    }
}
