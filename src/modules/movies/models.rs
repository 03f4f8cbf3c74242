use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A catalogued film.
///
/// Every field is optional on input: missing strings decode as empty and a
/// missing or `null` director decodes as `None`. Unknown fields are ignored.
/// Capitalised and upper-case spellings of each key are accepted as well.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Movie {
    /// Server-assigned identifier, ignored on input
    #[serde(alias = "Id", alias = "ID")]
    pub id: String,
    #[serde(alias = "Isbn", alias = "ISBN")]
    pub isbn: String,
    #[serde(alias = "Title", alias = "TITLE")]
    pub title: String,
    /// Exclusively owned director record, serialized as `null` when absent
    #[serde(alias = "Director", alias = "DIRECTOR")]
    pub director: Option<Director>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Director {
    #[serde(alias = "Firstname", alias = "FirstName", alias = "FIRSTNAME")]
    pub firstname: String,
    #[serde(alias = "Lastname", alias = "LastName", alias = "LASTNAME")]
    pub lastname: String,
}

impl Movie {
    pub fn new(
        id: impl Into<String>,
        isbn: impl Into<String>,
        title: impl Into<String>,
        director: Option<Director>,
    ) -> Self {
        Self {
            id: id.into(),
            isbn: isbn.into(),
            title: title.into(),
            director,
        }
    }
}

impl Director {
    pub fn new(firstname: impl Into<String>, lastname: impl Into<String>) -> Self {
        Self {
            firstname: firstname.into(),
            lastname: lastname.into(),
        }
    }
}

/// The two records every fresh catalogue starts with.
pub fn demo_movies() -> Vec<Movie> {
    vec![
        Movie::new(
            "1",
            "438227",
            "Movie One",
            Some(Director::new("John", "Doe")),
        ),
        Movie::new(
            "2",
            "453218",
            "Movie Two",
            Some(Director::new("Steve", "Smith")),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn movie_round_trips_through_json() {
        for movie in [
            Movie::new("7", "111", "Seven", Some(Director::new("Ann", "Lee"))),
            Movie::new("8", "222", "Eight", None),
        ] {
            let encoded = serde_json::to_string(&movie).unwrap();
            let decoded: Movie = serde_json::from_str(&encoded).unwrap();
            assert_eq!(decoded, movie);
        }
    }

    #[test]
    fn absent_director_serializes_as_null() {
        let value = serde_json::to_value(Movie::new("1", "000", "Changed", None)).unwrap();
        assert_eq!(
            value,
            json!({"id": "1", "isbn": "000", "title": "Changed", "director": null})
        );
    }

    #[test]
    fn missing_fields_decode_as_empty() {
        let movie: Movie = serde_json::from_value(json!({"title": "Only a title"})).unwrap();
        assert_eq!(movie.id, "");
        assert_eq!(movie.isbn, "");
        assert_eq!(movie.title, "Only a title");
        assert_eq!(movie.director, None);
    }

    #[test]
    fn capitalised_keys_are_accepted() {
        let movie: Movie = serde_json::from_value(json!({
            "ISBN": "123",
            "Title": "Upper",
            "Director": {"FirstName": "Ada", "Lastname": "Byron"}
        }))
        .unwrap();

        assert_eq!(
            movie,
            Movie::new("", "123", "Upper", Some(Director::new("Ada", "Byron")))
        );
        assert_eq!(
            serde_json::to_value(&movie).unwrap()["title"],
            json!("Upper")
        );
    }

    #[test]
    fn unknown_fields_are_ignored_and_types_are_checked() {
        let movie: Movie =
            serde_json::from_value(json!({"isbn": "1", "rating": 5, "director": {}})).unwrap();
        assert_eq!(movie.director, Some(Director::default()));

        assert!(serde_json::from_value::<Movie>(json!({"title": 42})).is_err());
    }
}
