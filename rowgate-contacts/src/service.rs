use crate::entity::Contact;

pub struct FindContactQuery {
    pub id: i64,
}

pub struct RegisterContactCommand {
    pub name: String,
    pub email: String,
}

#[async_trait::async_trait]
pub trait ContactService: Send {
    async fn find_contact(
        &mut self,
        query: FindContactQuery,
    ) -> rowgate::Result<Contact>;

    async fn list_contacts(&mut self) -> rowgate::Result<Vec<Contact>>;

    async fn register_contact(
        &mut self,
        command: RegisterContactCommand,
    ) -> rowgate::Result<Contact>;

    async fn archive_contact(&mut self, id: i64) -> rowgate::Result<Contact>;

    async fn remove_contact(&mut self, id: i64) -> rowgate::Result<()>;

    async fn purge_contacts(&mut self) -> rowgate::Result<()>;
}

mod contact_service_impl;
pub use contact_service_impl::*;
