//! Status and role enums persisted as upper-case strings.
//!
//! Every enum parses from its wire form via [`FromStr`]; unknown values become
//! [`ModelError::Validation`] carrying the message the API returns verbatim.
use std::str::FromStr;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RestaurantStatus {
    #[sea_orm(string_value = "ACTIVE")]
    Active,
    #[sea_orm(string_value = "DE_ACTIVE")]
    DeActive,
}

/// Occupancy of a dining table or parking slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableStatus {
    #[sea_orm(string_value = "AVAILABLE")]
    Available,
    #[sea_orm(string_value = "OCCUPIED")]
    Occupied,
    #[sea_orm(string_value = "RESERVED")]
    Reserved,
}

pub type SlotStatus = TableStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    #[sea_orm(string_value = "PENDING")]
    Pending,
    #[sea_orm(string_value = "CONFIRMED")]
    Confirmed,
    #[sea_orm(string_value = "CANCELLED")]
    Cancelled,
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
}

impl BookingStatus {
    /// Terminal bookings release their table and never conflict.
    pub fn is_terminal(self) -> bool {
        matches!(self, BookingStatus::Cancelled | BookingStatus::Completed)
    }

    pub const TERMINAL: [BookingStatus; 2] = [BookingStatus::Cancelled, BookingStatus::Completed];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[sea_orm(string_value = "PENDING")]
    Pending,
    #[sea_orm(string_value = "CONFIRMED")]
    Confirmed,
    #[sea_orm(string_value = "CANCELLED")]
    Cancelled,
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdminRole {
    #[sea_orm(string_value = "ADMIN")]
    Admin,
    #[sea_orm(string_value = "SUPER_ADMIN")]
    SuperAdmin,
}

macro_rules! parse_upper {
    ($ty:ty, $msg:expr) => {
        impl FromStr for $ty {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty>::try_from_value(&s.to_string()).map_err(|_| ModelError::Validation($msg.into()))
            }
        }
    };
}

parse_upper!(RestaurantStatus, "Status must be ACTIVE or DE_ACTIVE");
parse_upper!(TableStatus, "Status must be AVAILABLE, OCCUPIED, or RESERVED");
parse_upper!(BookingStatus, "Status must be PENDING, CONFIRMED, CANCELLED, or COMPLETED");
parse_upper!(OrderStatus, "Status must be PENDING, CONFIRMED, CANCELLED, or COMPLETED");
parse_upper!(AdminRole, "role must be one of ADMIN, SUPER_ADMIN");
