//! Value objects representing immutable domain concepts

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

mod address;
mod estimation;
mod money;
mod period;
mod rates;
mod status;

pub use address::Address;
pub use estimation::{Complexity, EstimationRule, Profile, ProjectEstimation};
pub use money::Money;
pub use period::ProjectPeriod;
pub use rates::{OverheadPercentage, TaxRate};
pub use status::{ProjectStatus, QuoteStatus};

macro_rules! uuid_identifier {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a new random identifier
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Create from string representation
            pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
                Ok(Self(Uuid::parse_str(s)?))
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

uuid_identifier!(
    /// Client identifier
    ClientId
);
uuid_identifier!(
    /// Project identifier
    ProjectId
);
uuid_identifier!(
    /// Module identifier, scoped to its owning project
    ModuleId
);
uuid_identifier!(
    /// Feature identifier, scoped to its owning module
    FeatureId
);
uuid_identifier!(
    /// Quote identifier
    QuoteId
);
uuid_identifier!(
    /// Quote line identifier
    QuoteItemId
);
