use diesel::prelude::*;

use crate::{
    domain::event::{EventChanges, NewTimelineEvent, TimelineEvent},
    domain::types::{ClientId, EventId},
    repository::{DieselRepository, EventReader, EventWriter},
    repository::errors::RepositoryResult,
};

impl EventReader for DieselRepository {
    fn get_event_by_id(&self, id: EventId) -> RepositoryResult<Option<TimelineEvent>> {
        use crate::models::event::TimelineEvent as DbEvent;
        use crate::schema::events;

        let mut conn = self.conn()?;
        let event = events::table
            .find(id.get())
            .first::<DbEvent>(&mut conn)
            .optional()?;

        Ok(event.map(Into::into))
    }

    fn list_events(&self, client_id: ClientId) -> RepositoryResult<Vec<TimelineEvent>> {
        use crate::models::event::TimelineEvent as DbEvent;
        use crate::schema::events;

        let mut conn = self.conn()?;
        // SQLite sorts NULL positions first; load in id order and let the
        // caller apply the position-with-nulls-last rule, which also keeps
        // the tie-break stable.
        let items = events::table
            .filter(events::client_id.eq(client_id.get()))
            .order(events::id.asc())
            .load::<DbEvent>(&mut conn)?;

        let mut events: Vec<TimelineEvent> = items.into_iter().map(Into::into).collect();
        events.sort_by_key(|e| e.position.map_or(i64::MAX, i64::from));
        Ok(events)
    }
}

impl EventWriter for DieselRepository {
    fn create_event(&self, new_event: &NewTimelineEvent) -> RepositoryResult<TimelineEvent> {
        use crate::models::event::{NewTimelineEvent as DbNewEvent, TimelineEvent as DbEvent};
        use crate::schema::events;

        let mut conn = self.conn()?;
        let insertable: DbNewEvent = new_event.into();
        let created = diesel::insert_into(events::table)
            .values(&insertable)
            .get_result::<DbEvent>(&mut conn)?;

        Ok(created.into())
    }

    fn update_event(&self, id: EventId, changes: &EventChanges) -> RepositoryResult<TimelineEvent> {
        use crate::models::event::{TimelineEvent as DbEvent, UpdateTimelineEvent};
        use crate::schema::events;

        let mut conn = self.conn()?;
        let changeset = UpdateTimelineEvent {
            name: changes.name.clone(),
            time: changes.time.clone(),
            details: changes
                .details
                .as_ref()
                .map(|details| details.to_value().to_string()),
        };

        let updated = diesel::update(events::table.find(id.get()))
            .set(&changeset)
            .get_result::<DbEvent>(&mut conn)?;

        Ok(updated.into())
    }

    fn set_event_positions(&self, positions: &[(EventId, i32)]) -> RepositoryResult<usize> {
        use crate::schema::events;

        let mut conn = self.conn()?;
        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            let mut updated = 0;
            for (id, position) in positions {
                updated += diesel::update(events::table.find(id.get()))
                    .set(events::position.eq(position))
                    .execute(conn)?;
            }
            Ok(updated)
        })
        .map_err(Into::into)
    }

    fn delete_event(&self, id: EventId) -> RepositoryResult<()> {
        use crate::schema::events;

        let mut conn = self.conn()?;
        diesel::delete(events::table.find(id.get())).execute(&mut conn)?;
        Ok(())
    }
}
