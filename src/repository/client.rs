use chrono::Utc;
use diesel::prelude::*;

use crate::{
    domain::client::{Client, ClientFlagUpdate, NewClient, UpdateClient},
    domain::types::{ClientId, PublicId},
    repository::{ClientListQuery, ClientReader, ClientWriter, DieselRepository},
    repository::errors::RepositoryResult,
};

impl ClientReader for DieselRepository {
    fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>> {
        use crate::models::client::Client as DbClient;
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let client = clients::table
            .find(id.get())
            .first::<DbClient>(&mut conn)
            .optional()?;

        client.map(Client::try_from).transpose().map_err(Into::into)
    }

    fn get_client_by_public_id(&self, public_id: PublicId) -> RepositoryResult<Option<Client>> {
        use crate::models::client::Client as DbClient;
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let client = clients::table
            .filter(clients::public_id.eq(public_id.to_string()))
            .first::<DbClient>(&mut conn)
            .optional()?;

        client.map(Client::try_from).transpose().map_err(Into::into)
    }

    fn list_clients(&self, query: ClientListQuery) -> RepositoryResult<(usize, Vec<Client>)> {
        use crate::models::client::Client as DbClient;
        use crate::schema::clients;

        let mut conn = self.conn()?;

        let build = || {
            let mut q = clients::table.into_boxed();
            if !query.include_archived {
                q = q.filter(clients::archived.eq(false));
            }
            if let Some(search) = &query.search {
                let pattern = format!("%{search}%");
                q = q.filter(
                    clients::client_name
                        .like(pattern.clone())
                        .or(clients::client_email.like(pattern.clone()))
                        .or(clients::client_phone.like(pattern.clone()))
                        .or(clients::venue_name.like(pattern)),
                );
            }
            q
        };

        let total: i64 = build().count().get_result(&mut conn)?;

        let mut items_query = build().order((clients::event_date.asc(), clients::id.asc()));
        if let Some(pagination) = &query.pagination {
            let page = pagination.page.max(1) as i64;
            let per_page = pagination.per_page as i64;
            items_query = items_query
                .limit(per_page)
                .offset((page - 1) * per_page);
        }

        let items = items_query
            .load::<DbClient>(&mut conn)?
            .into_iter()
            .map(Client::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((total as usize, items))
    }
}

impl ClientWriter for DieselRepository {
    fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client> {
        use crate::models::client::{Client as DbClient, NewClient as DbNewClient};
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let insertable = DbNewClient::from_domain(new_client, PublicId::new());
        let created = diesel::insert_into(clients::table)
            .values(&insertable)
            .get_result::<DbClient>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn update_client(
        &self,
        client_id: ClientId,
        updates: &UpdateClient,
    ) -> RepositoryResult<Client> {
        use crate::models::client::{Client as DbClient, UpdateClient as DbUpdateClient};
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateClient::from_domain(updates, Utc::now().naive_utc());

        let updated = diesel::update(clients::table.find(client_id.get()))
            .set(&db_updates)
            .get_result::<DbClient>(&mut conn)?;

        Ok(updated.try_into()?)
    }

    fn set_client_flags(
        &self,
        client_id: ClientId,
        flags: &ClientFlagUpdate,
    ) -> RepositoryResult<Client> {
        use crate::models::client::{Client as DbClient, ClientFlagChangeset};
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let changeset = ClientFlagChangeset {
            signature: flags.signature.clone(),
            signature_date: flags.signature_date,
            deposit_paid: flags.deposit_paid,
            balance_paid: flags.balance_paid,
            payment_intent_id: flags.payment_intent_id.clone(),
            onboarding_completed: flags.onboarding_completed,
            archived: flags.archived,
            updated_at: Some(Utc::now().naive_utc()),
        };

        let updated = diesel::update(clients::table.find(client_id.get()))
            .set(&changeset)
            .get_result::<DbClient>(&mut conn)?;

        Ok(updated.try_into()?)
    }
}
