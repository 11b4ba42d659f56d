pub struct RegisterContactRequest {
    pub name: String,
    pub email: String,
}

#[async_trait::async_trait]
pub trait RegisterContactUsecase: Send {
    async fn execute(
        &mut self,
        request: RegisterContactRequest,
    ) -> rowgate::Result<crate::entity::Contact>;
}

#[async_trait::async_trait]
pub trait PurgeContactsUsecase: Send {
    async fn execute(&mut self) -> rowgate::Result<()>;
}

mod contact_usecase_impl;
pub use contact_usecase_impl::*;
