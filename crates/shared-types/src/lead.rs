use chrono::{DateTime, Local, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[cfg(feature = "validation")]
use std::borrow::Cow;
#[cfg(feature = "validation")]
use validator::{Validate, ValidationError};

#[cfg(feature = "validation")]
use crate::AppError;

/// Country calling code applied to national numbers typed without a prefix.
pub const DEFAULT_COUNTRY_CODE: &str = "91";

/// Digits in a national subscriber number for the default country.
const NATIONAL_NUMBER_LEN: usize = 10;

/// Models pre-selected when a new form session starts.
pub const DEFAULT_CAR_MODELS: &[CarModel] = &[CarModel::HondaCity, CarModel::HyundaiCreta];

/// `datetime-local` input value format.
pub const PICKER_FORMAT: &str = "%Y-%m-%dT%H:%M";

pub const CONTACT_NAME_MESSAGE: &str = "Contact name is required";
pub const PHONE_NUMBER_MESSAGE: &str = "Enter a valid phone number, e.g. +91 63019 79823";
pub const CAR_MODELS_MESSAGE: &str = "Select car models from the list, each at most once";
pub const PREFERRED_TIME_MESSAGE: &str = "Select a valid date and time";

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// A car model from the fixed catalog offered in the multi-select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum CarModel {
    #[serde(rename = "Maruti Suzuki")]
    MarutiSuzuki,
    #[serde(rename = "Toyota Corolla")]
    ToyotaCorolla,
    #[serde(rename = "Honda City")]
    HondaCity,
    #[serde(rename = "Hyundai Creta")]
    HyundaiCreta,
    #[serde(rename = "Mahindra Thar")]
    MahindraThar,
    #[serde(rename = "Tata Safari")]
    TataSafari,
    #[serde(rename = "Ford Figo")]
    FordFigo,
    #[serde(rename = "Chevrolet Beat")]
    ChevroletBeat,
}

impl CarModel {
    /// Every catalog entry in display order.
    pub const ALL: [CarModel; 8] = [
        CarModel::MarutiSuzuki,
        CarModel::ToyotaCorolla,
        CarModel::HondaCity,
        CarModel::HyundaiCreta,
        CarModel::MahindraThar,
        CarModel::TataSafari,
        CarModel::FordFigo,
        CarModel::ChevroletBeat,
    ];

    /// Display label, also the value sent to the calling API.
    pub fn as_str(&self) -> &'static str {
        match self {
            CarModel::MarutiSuzuki => "Maruti Suzuki",
            CarModel::ToyotaCorolla => "Toyota Corolla",
            CarModel::HondaCity => "Honda City",
            CarModel::HyundaiCreta => "Hyundai Creta",
            CarModel::MahindraThar => "Mahindra Thar",
            CarModel::TataSafari => "Tata Safari",
            CarModel::FordFigo => "Ford Figo",
            CarModel::ChevroletBeat => "Chevrolet Beat",
        }
    }

    /// Look up a catalog entry by its exact display label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == label)
    }
}

impl fmt::Display for CarModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Catalog labels in display order.
pub fn catalog_labels() -> Vec<String> {
    CarModel::ALL.iter().map(|m| m.as_str().to_string()).collect()
}

// ---------------------------------------------------------------------------
// Fields
// ---------------------------------------------------------------------------

/// Identifies one input of the lead form. Keys the field error map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeadField {
    ContactName,
    PhoneNumber,
    CarModels,
    Notes,
    PreferredTime,
}

impl LeadField {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadField::ContactName => "contact_name",
            LeadField::PhoneNumber => "phone_number",
            LeadField::CarModels => "car_models",
            LeadField::Notes => "notes",
            LeadField::PreferredTime => "preferred_time",
        }
    }
}

// ---------------------------------------------------------------------------
// Phone numbers
// ---------------------------------------------------------------------------

/// A phone number normalised to E.164 (`+` followed by digits).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Parse user input with country context.
    ///
    /// Spaces, dashes, dots and parentheses are ignored. A leading `+` or
    /// `00` marks an international number of 8 to 15 digits. Anything else
    /// is a national number: one trunk `0` may precede exactly ten digits,
    /// which are prefixed with `default_country_code`.
    pub fn parse(input: &str, default_country_code: &str) -> Option<Self> {
        let trimmed = input.trim();
        let (international, rest) = if let Some(rest) = trimmed.strip_prefix('+') {
            (true, rest)
        } else if let Some(rest) = trimmed.strip_prefix("00") {
            (true, rest)
        } else {
            (false, trimmed)
        };

        let mut digits = String::with_capacity(rest.len());
        for c in rest.chars() {
            match c {
                '0'..='9' => digits.push(c),
                ' ' | '-' | '.' | '(' | ')' => {}
                _ => return None,
            }
        }

        if international {
            // A national trunk `0` kept after the default country code
            let digits = match digits.strip_prefix(default_country_code) {
                Some(rest) if rest.starts_with('0') => {
                    format!("{default_country_code}{}", &rest[1..])
                }
                _ => digits,
            };
            if !(8..=15).contains(&digits.len()) || digits.starts_with('0') {
                return None;
            }
            return Some(Self(format!("+{digits}")));
        }

        let national = digits.strip_prefix('0').unwrap_or(&digits);
        if national.len() != NATIONAL_NUMBER_LEN || national.starts_with('0') {
            return None;
        }
        Some(Self(format!("+{default_country_code}{national}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Date/time coercion
// ---------------------------------------------------------------------------

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    PICKER_FORMAT,
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Coerce a date-like picker value into a UTC timestamp.
///
/// Accepts RFC 3339, the `datetime-local` formats and a bare date
/// (midnight). Values without an offset are read in the local time zone.
pub fn coerce_preferred_time(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }

    let naive = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;

    Some(match Local.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        // Skipped by a DST transition
        LocalResult::None => Utc.from_utc_datetime(&naive),
    })
}

// ---------------------------------------------------------------------------
// Form values
// ---------------------------------------------------------------------------

/// Raw field values as the form holds them between keystrokes.
///
/// Missing JSON fields deserialize as empty so that every problem is
/// reported per field rather than as a malformed body.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
#[serde(default)]
pub struct LeadCallForm {
    #[cfg_attr(
        feature = "validation",
        validate(custom(function = "validate_contact_name"))
    )]
    pub contact_name: String,
    #[cfg_attr(
        feature = "validation",
        validate(custom(function = "validate_phone_number"))
    )]
    pub phone_number: String,
    #[cfg_attr(
        feature = "validation",
        validate(custom(function = "validate_car_models"))
    )]
    pub car_models: Vec<String>,
    pub notes: String,
    #[cfg_attr(
        feature = "validation",
        validate(custom(function = "validate_preferred_time"))
    )]
    pub preferred_time: String,
}

impl LeadCallForm {
    /// State of a freshly mounted form: sample models and the given time.
    pub fn with_defaults(now: DateTime<Local>) -> Self {
        Self {
            car_models: DEFAULT_CAR_MODELS
                .iter()
                .map(|m| m.as_str().to_string())
                .collect(),
            preferred_time: now.format(PICKER_FORMAT).to_string(),
            ..Self::default()
        }
    }

    /// Start a new form session at the current local time.
    pub fn new_session() -> Self {
        Self::with_defaults(Local::now())
    }

    /// Add or remove a catalog model, keeping selection order.
    pub fn toggle_car_model(&mut self, model: CarModel) {
        let label = model.as_str();
        if let Some(pos) = self.car_models.iter().position(|m| m == label) {
            self.car_models.remove(pos);
        } else {
            self.car_models.push(label.to_string());
        }
    }

    /// Run the schema and produce the typed request, or a field error map.
    #[cfg(feature = "validation")]
    pub fn validate_form(&self) -> Result<LeadCallRequest, AppError> {
        self.validate()?;

        // The schema has accepted every field; these conversions re-run the
        // same parsers to obtain typed values.
        let phone_number = PhoneNumber::parse(&self.phone_number, DEFAULT_COUNTRY_CODE)
            .ok_or_else(|| single_field_error(LeadField::PhoneNumber, PHONE_NUMBER_MESSAGE))?;
        let car_models = self
            .car_models
            .iter()
            .map(|label| CarModel::from_label(label))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| single_field_error(LeadField::CarModels, CAR_MODELS_MESSAGE))?;
        let preferred_time = coerce_preferred_time(&self.preferred_time)
            .ok_or_else(|| single_field_error(LeadField::PreferredTime, PREFERRED_TIME_MESSAGE))?;

        Ok(LeadCallRequest {
            contact_name: self.contact_name.trim().to_string(),
            phone_number,
            car_models,
            notes: self.notes.clone(),
            preferred_time,
        })
    }
}

#[cfg(feature = "validation")]
fn single_field_error(field: LeadField, message: &str) -> AppError {
    let mut fields = std::collections::HashMap::new();
    fields.insert(field.as_str().to_string(), message.to_string());
    AppError::validation("Please correct the highlighted fields", fields)
}

#[cfg(feature = "validation")]
fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

#[cfg(feature = "validation")]
fn validate_contact_name(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(invalid("required", CONTACT_NAME_MESSAGE));
    }
    Ok(())
}

#[cfg(feature = "validation")]
fn validate_phone_number(value: &str) -> Result<(), ValidationError> {
    PhoneNumber::parse(value, DEFAULT_COUNTRY_CODE)
        .map(|_| ())
        .ok_or_else(|| invalid("phone_number", PHONE_NUMBER_MESSAGE))
}

#[cfg(feature = "validation")]
fn validate_car_models(values: &[String]) -> Result<(), ValidationError> {
    for (i, label) in values.iter().enumerate() {
        if CarModel::from_label(label).is_none() || values[..i].contains(label) {
            return Err(invalid("car_models", CAR_MODELS_MESSAGE));
        }
    }
    Ok(())
}

#[cfg(feature = "validation")]
fn validate_preferred_time(value: &str) -> Result<(), ValidationError> {
    coerce_preferred_time(value)
        .map(|_| ())
        .ok_or_else(|| invalid("preferred_time", PREFERRED_TIME_MESSAGE))
}

// ---------------------------------------------------------------------------
// Validated request
// ---------------------------------------------------------------------------

/// A lead that passed validation and may be handed to a caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct LeadCallRequest {
    pub contact_name: String,
    pub phone_number: PhoneNumber,
    pub car_models: Vec<CarModel>,
    pub notes: String,
    pub preferred_time: DateTime<Utc>,
}

impl LeadCallRequest {
    /// Selected models joined for the calling agent, in selection order.
    pub fn models_interested(&self) -> String {
        self.car_models
            .iter()
            .map(CarModel::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Render back into form values, normalised so that a second
    /// validation pass (on another machine) yields the same request.
    pub fn into_form(self) -> LeadCallForm {
        LeadCallForm {
            contact_name: self.contact_name,
            phone_number: self.phone_number.0,
            car_models: self
                .car_models
                .iter()
                .map(|m| m.as_str().to_string())
                .collect(),
            notes: self.notes,
            preferred_time: self.preferred_time.to_rfc3339(),
        }
    }
}
