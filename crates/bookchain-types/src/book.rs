use serde::{Deserialize, Serialize};

/// A catalogue record for a book.
///
/// `id` is never trusted from input; the server derives it from
/// `isbn` and `publish_date` before returning the record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Book {
    pub author: String,
    pub id: String,
    pub title: String,
    pub publish_date: String,
    /// International Standard Book Number.
    pub isbn: String,
}

impl Book {
    /// Replace the record's id, consuming and returning the record.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_fields_in_declared_order() {
        let book = Book {
            author: "Ursula K. Le Guin".into(),
            id: "abc".into(),
            title: "The Dispossessed".into(),
            publish_date: "1974-05-01".into(),
            isbn: "978-0060512750".into(),
        };
        let json = serde_json::to_string(&book).unwrap();
        let author = json.find("\"author\"").unwrap();
        let id = json.find("\"id\"").unwrap();
        let title = json.find("\"title\"").unwrap();
        let publish = json.find("\"publish_date\"").unwrap();
        let isbn = json.find("\"isbn\"").unwrap();
        assert!(author < id && id < title && title < publish && publish < isbn);
    }

    #[test]
    fn with_id_overrides_client_value() {
        let book: Book = serde_json::from_str(r#"{"id":"forged","isbn":"1"}"#).unwrap();
        let book = book.with_id("derived");
        assert_eq!(book.id, "derived");
        assert_eq!(book.isbn, "1");
    }
}
