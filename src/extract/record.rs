/// Marker written for any field that could not be determined
pub const NOT_AVAILABLE: &str = "N/A";

/// Output column order
pub const COLUMNS: [&str; 10] = [
    "Company",
    "First Name",
    "Last Name",
    "Street",
    "Street 2",
    "City",
    "State",
    "Zip",
    "Phone",
    "Email",
];

/// One contact record extracted from a listing's detail page
///
/// Fields the page did not yield are `None` and render as [`NOT_AVAILABLE`],
/// so every row carries all ten columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdvisorRecord {
    pub company: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub street: Option<String>,
    pub street2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl AdvisorRecord {
    fn fields(&self) -> [&Option<String>; 10] {
        [
            &self.company,
            &self.first_name,
            &self.last_name,
            &self.street,
            &self.street2,
            &self.city,
            &self.state,
            &self.zip,
            &self.phone,
            &self.email,
        ]
    }

    /// Renders the record in [`COLUMNS`] order
    pub fn to_row(&self) -> [String; 10] {
        self.fields().map(|field| {
            field
                .as_deref()
                .unwrap_or(NOT_AVAILABLE)
                .to_string()
        })
    }

    /// Number of fields that render as [`NOT_AVAILABLE`]
    pub fn missing_fields(&self) -> usize {
        self.fields().iter().filter(|field| field.is_none()).count()
    }
}
