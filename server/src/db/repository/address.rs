//! Address Repository

use chrono::Utc;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{Address, AddressCreate, AddressUpdate};

const ADDRESS_TABLE: &str = "address";

#[derive(Clone)]
pub struct AddressRepository {
    base: BaseRepository,
}

impl AddressRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(&self, user: RecordId, data: AddressCreate) -> RepoResult<Address> {
        let address = Address {
            id: None,
            user,
            street: data.street,
            city: data.city,
            state: data.state,
            postal_code: data.postal_code,
            country: data.country,
            phone: data.phone,
            created_at: Utc::now(),
        };
        let created: Option<Address> =
            self.base.db().create(ADDRESS_TABLE).content(address).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create address".to_string()))
    }

    pub async fn find_by_user(&self, user: &RecordId) -> RepoResult<Vec<Address>> {
        let addresses: Vec<Address> = self
            .base
            .db()
            .query("SELECT * FROM address WHERE user = $user ORDER BY createdAt")
            .bind(("user", user.clone()))
            .await?
            .take(0)?;
        Ok(addresses)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Address>> {
        let thing = parse_record_id(ADDRESS_TABLE, id);
        let address: Option<Address> = self.base.db().select(thing).await?;
        Ok(address)
    }

    pub async fn update(&self, id: &str, data: AddressUpdate) -> RepoResult<Address> {
        let thing = parse_record_id(ADDRESS_TABLE, id);

        let mut set_parts: Vec<&str> = Vec::new();
        if data.street.is_some() {
            set_parts.push("street = $street");
        }
        if data.city.is_some() {
            set_parts.push("city = $city");
        }
        if data.state.is_some() {
            set_parts.push("state = $state");
        }
        if data.postal_code.is_some() {
            set_parts.push("postalCode = $postal_code");
        }
        if data.country.is_some() {
            set_parts.push("country = $country");
        }
        if data.phone.is_some() {
            set_parts.push("phone = $phone");
        }

        if set_parts.is_empty() {
            return self
                .find_by_id(id)
                .await?
                .ok_or_else(|| RepoError::NotFound(format!("Address {} not found", id)));
        }

        let sql = format!("UPDATE $thing SET {} RETURN AFTER", set_parts.join(", "));
        let mut query = self.base.db().query(sql).bind(("thing", thing));

        if let Some(v) = data.street {
            query = query.bind(("street", v));
        }
        if let Some(v) = data.city {
            query = query.bind(("city", v));
        }
        if let Some(v) = data.state {
            query = query.bind(("state", v));
        }
        if let Some(v) = data.postal_code {
            query = query.bind(("postal_code", v));
        }
        if let Some(v) = data.country {
            query = query.bind(("country", v));
        }
        if let Some(v) = data.phone {
            query = query.bind(("phone", v));
        }

        let mut result = query.await?;
        let updated: Vec<Address> = result.take(0)?;
        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Address {} not found", id)))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let thing = parse_record_id(ADDRESS_TABLE, id);
        let deleted: Option<Address> = self.base.db().delete(thing).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound(format!("Address {} not found", id)));
        }
        Ok(())
    }
}
