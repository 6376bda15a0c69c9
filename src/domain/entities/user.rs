//! Blog author entity.

use serde::{Deserialize, Serialize};

/// User identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl UserId {
    /// Returns the id as the signed seed used by the avatar service.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn as_seed(self) -> i64 {
        self.0 as i64
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Map coordinates of an address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geo {
    /// Latitude.
    pub lat: String,
    /// Longitude.
    pub lng: String,
}

/// Postal address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    /// Street.
    pub street: String,
    /// Suite or apartment.
    pub suite: String,
    /// City.
    pub city: String,
    /// Postal code.
    pub zipcode: String,
    /// Coordinates, when known.
    #[serde(default)]
    pub geo: Option<Geo>,
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}, {} - {} ({})",
            self.street, self.suite, self.city, self.zipcode
        )
    }
}

/// Employer details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    /// Company name.
    pub name: String,
    /// Company slogan.
    #[serde(default)]
    pub catch_phrase: String,
    /// Company buzzwords.
    #[serde(default)]
    pub bs: String,
}

/// A blog author.
///
/// Only `id`, `name`, `username` and `email` are guaranteed by the API;
/// contact details are optional so partial records still deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// User id.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Login name.
    pub username: String,
    /// Contact email.
    pub email: String,
    /// Postal address.
    #[serde(default)]
    pub address: Option<Address>,
    /// Phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Personal website.
    #[serde(default)]
    pub website: Option<String>,
    /// Employer.
    #[serde(default)]
    pub company: Option<Company>,
}

impl User {
    /// Creates a user without contact details.
    #[must_use]
    pub fn new(
        id: u64,
        name: impl Into<String>,
        username: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: UserId(id),
            name: name.into(),
            username: username.into(),
            email: email.into(),
            address: None,
            phone: None,
            website: None,
            company: None,
        }
    }

    /// Sets the employer.
    #[must_use]
    pub fn with_company(mut self, company: Company) -> Self {
        self.company = Some(company);
        self
    }

    /// Returns the username prefixed with `@`.
    #[must_use]
    pub fn handle(&self) -> String {
        format!("@{}", self.username)
    }

    /// Returns up to two uppercase initials from the display name.
    #[must_use]
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }
}
