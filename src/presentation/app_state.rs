// Application state for HTTP handlers
use crate::application::entry_service::EntryService;

#[derive(Clone)]
pub struct AppState {
    pub entry_service: EntryService,
}
