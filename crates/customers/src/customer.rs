use serde::{Deserialize, Serialize};

use stockwise_core::{CustomerId, DomainError, DomainResult, Entity};

/// Contact information for a customer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub national_id: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Customer record.
///
/// The order engine only ever checks that a customer exists; everything else
/// about a customer is catalog data owned by the (out-of-scope) CRUD layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    id: CustomerId,
    name: String,
    contact: ContactInfo,
    /// Walk-in buyer without fiscal identity (no invoice details required).
    final_consumer: bool,
}

impl Customer {
    pub fn new(
        id: CustomerId,
        name: impl Into<String>,
        contact: ContactInfo,
        final_consumer: bool,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::invalid_argument("customer name cannot be empty"));
        }
        Ok(Self {
            id,
            name,
            contact,
            final_consumer,
        })
    }

    pub fn id_typed(&self) -> CustomerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contact(&self) -> &ContactInfo {
        &self.contact
    }

    pub fn is_final_consumer(&self) -> bool {
        self.final_consumer
    }
}

impl Entity for Customer {
    type Id = CustomerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
