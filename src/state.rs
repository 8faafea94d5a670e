use std::sync::Arc;

use crate::auth::AuthService;
use crate::config::Config;
use crate::dispatch::Dispatcher;
use crate::mail::Mailer;
use crate::store::{
    ContactListRepository, GroupRepository, MailLogRepository, SessionRepository, Store,
    TemplateRepository, UserRepository,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub auth: Arc<AuthService>,
    pub store: Store,
    pub users: UserRepository,
    pub sessions: SessionRepository,
    pub groups: GroupRepository,
    pub contact_lists: ContactListRepository,
    pub templates: TemplateRepository,
    pub mail_log: MailLogRepository,
    pub dispatcher: Arc<Dispatcher>,
}

impl AppState {
    pub fn new(config: Config, store: Store, mailer: Mailer) -> Self {
        let auth = AuthService::new(&config);
        let mail_log = MailLogRepository::new(store.clone());

        Self {
            config: Arc::new(config),
            auth: Arc::new(auth),
            users: UserRepository::new(store.clone()),
            sessions: SessionRepository::new(store.clone()),
            groups: GroupRepository::new(store.clone()),
            contact_lists: ContactListRepository::new(store.clone()),
            templates: TemplateRepository::new(store.clone()),
            dispatcher: Arc::new(Dispatcher::new(mailer, mail_log.clone())),
            mail_log,
            store,
        }
    }
}
