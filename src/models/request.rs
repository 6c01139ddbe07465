use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BookingError;

// ---------------------------------------------------------------------------
// Gender
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Men,
    #[default]
    Women,
    Others,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Men => "men",
            Gender::Women => "women",
            Gender::Others => "others",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "men" => Ok(Gender::Men),
            "women" => Ok(Gender::Women),
            "others" => Ok(Gender::Others),
            other => Err(BookingError::InvalidArgument(format!(
                "Unknown gender: {}",
                other
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// PurchaseType
// ---------------------------------------------------------------------------

/// Package kind. Selects which price list and which offerings apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PurchaseType {
    #[default]
    Trial,
    Permanent,
}

impl PurchaseType {
    pub const ALL: [PurchaseType; 2] = [PurchaseType::Trial, PurchaseType::Permanent];

    pub fn as_str(&self) -> &'static str {
        match self {
            PurchaseType::Trial => "trial",
            PurchaseType::Permanent => "permanent",
        }
    }
}

impl fmt::Display for PurchaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PurchaseType {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trial" => Ok(PurchaseType::Trial),
            "permanent" => Ok(PurchaseType::Permanent),
            other => Err(BookingError::InvalidArgument(format!(
                "Unknown purchase type: {}",
                other
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Field
// ---------------------------------------------------------------------------

/// Form field identifiers, displayed and parsed by their wire names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    PhoneNumber,
    Email,
    Gender,
    PurchaseType,
    SelectedBodyParts,
    SelectedDate,
    Coupon,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::PhoneNumber => "phoneNumber",
            Field::Email => "email",
            Field::Gender => "gender",
            Field::PurchaseType => "purchaseType",
            Field::SelectedBodyParts => "selectedBodyParts",
            Field::SelectedDate => "selectedDate",
            Field::Coupon => "coupon",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Field::Name),
            "phoneNumber" => Ok(Field::PhoneNumber),
            "email" => Ok(Field::Email),
            "gender" => Ok(Field::Gender),
            "purchaseType" => Ok(Field::PurchaseType),
            "selectedBodyParts" => Ok(Field::SelectedBodyParts),
            "selectedDate" => Ok(Field::SelectedDate),
            "coupon" => Ok(Field::Coupon),
            other => Err(BookingError::InvalidArgument(format!(
                "Unknown field: {}",
                other
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// BookingRequest — form state, also the JSON body posted to the endpoint
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub name: String,
    pub phone_number: String,
    pub email: String,
    pub gender: Gender,
    pub purchase_type: PurchaseType,
    /// Insertion-ordered, no duplicates.
    pub selected_body_parts: Vec<String>,
    pub selected_date: String,
    #[serde(default)]
    pub coupon: String,
}

impl BookingRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_selected(&self, part: &str) -> bool {
        self.selected_body_parts.iter().any(|p| p == part)
    }

    /// Remove `part` if selected, otherwise append it. Returns `true` if the
    /// part is selected afterwards.
    pub fn toggle(&mut self, part: &str) -> bool {
        if let Some(pos) = self.selected_body_parts.iter().position(|p| p == part) {
            self.selected_body_parts.remove(pos);
            false
        } else {
            self.selected_body_parts.push(part.to_string());
            true
        }
    }
}
