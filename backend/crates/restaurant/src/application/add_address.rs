//! Add Address Use Case

use std::sync::Arc;

use chrono::Utc;
use kernel::id::{AddressId, IdentityId};

use crate::domain::entities::Address;
use crate::domain::repository::AddressRepository;
use crate::domain::value_objects::{Coordinates, Name};
use crate::error::RestaurantResult;

pub struct AddAddressInput {
    pub owner: IdentityId,
    pub label: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

pub struct AddAddressUseCase<A>
where
    A: AddressRepository,
{
    repo: Arc<A>,
}

impl<A> AddAddressUseCase<A>
where
    A: AddressRepository,
{
    pub fn new(repo: Arc<A>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: AddAddressInput) -> RestaurantResult<AddressId> {
        let label = Name::new(&input.label, "label")?;
        let location = Coordinates::new(input.lat, input.lng)?;

        let address = Address::new(input.owner, label, location, Utc::now());
        self.repo.create_address(&address).await?;

        tracing::info!(
            address_id = %address.id,
            identity_id = %address.identity_id,
            "Address added"
        );

        Ok(address.id)
    }
}
