use crate::error::model_error::ModelError;

use common::ErrorLocation;

use std::panic::Location;

use serde::{Deserialize, Serialize};

/// Number of items requested per page.
///
/// List endpoints cap `limit` at 100; zero would make the backend fall
/// back to its own default, so it is rejected here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct PageLimit(u32);

impl PageLimit {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 100;
    pub const DEFAULT: PageLimit = PageLimit(40);

    #[track_caller]
    pub fn new(limit: u32) -> Result<Self, ModelError> {
        if !(Self::MIN..=Self::MAX).contains(&limit) {
            return Err(ModelError::Validation {
                message: format!(
                    "Page limit {limit} out of range ({}-{})",
                    Self::MIN,
                    Self::MAX
                ),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(Self(limit))
    }

    #[inline]
    pub fn get(&self) -> u32 {
        self.0
    }

    #[inline]
    pub fn as_usize(&self) -> usize {
        self.0 as usize
    }
}

impl Default for PageLimit {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u32> for PageLimit {
    type Error = ModelError;

    #[track_caller]
    fn try_from(limit: u32) -> Result<Self, Self::Error> {
        Self::new(limit)
    }
}

impl From<PageLimit> for u32 {
    fn from(limit: PageLimit) -> Self {
        limit.0
    }
}
