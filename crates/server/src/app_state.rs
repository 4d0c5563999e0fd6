use notify_api::NotifyContext;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) api: NotifyContext,
}
