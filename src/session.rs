//! Page navigation state for a console user.
//!
//! Pages and the actions that move between them are closed enums; an action
//! that is not valid from the current page is rejected instead of silently
//! landing on some default page.

use serde::{Deserialize, Serialize};

use crate::config::Platform;
use crate::error::{AppError, Result};
use crate::models::MailStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum Page {
    Login,
    Register,
    ChooseService,
    ComposeDashboard { platform: Platform },
    Groups,
    CsvManagement,
    Templates,
    MailList { platform: Platform, status: MailStatus },
    LoggedOut,
}

impl Page {
    /// Pages reachable from the dashboard sidebar
    pub fn is_dashboard(&self) -> bool {
        matches!(
            self,
            Page::ComposeDashboard { .. }
                | Page::Groups
                | Page::CsvManagement
                | Page::Templates
                | Page::MailList { .. }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum NavAction {
    ShowLogin,
    ShowRegister,
    /// Issued by the login handler only; clients cannot send it
    #[serde(skip_deserializing)]
    Authenticated,
    ChooseService { platform: Platform },
    SwitchService,
    Compose,
    Groups,
    CsvManagement,
    Templates,
    MailList { status: MailStatus },
    Logout,
}

/// Navigation session of one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub email: String,
    pub page: Page,
    /// Service picked on the choose-service page
    pub platform: Option<Platform>,
}

impl Session {
    pub fn new(email: String) -> Self {
        Self {
            email,
            page: Page::Login,
            platform: None,
        }
    }

    /// Apply `action`, moving to the next page
    pub fn apply(&mut self, action: NavAction) -> Result<Page> {
        let next = match (self.page, action) {
            (Page::Login | Page::LoggedOut, NavAction::ShowRegister) => Page::Register,
            (Page::Register | Page::LoggedOut, NavAction::ShowLogin) => Page::Login,
            (Page::Login | Page::Register | Page::LoggedOut, NavAction::Authenticated) => {
                self.platform = None;
                Page::ChooseService
            }
            (Page::ChooseService, NavAction::ChooseService { platform }) => {
                self.platform = Some(platform);
                Page::ComposeDashboard { platform }
            }
            (page, NavAction::SwitchService) if page.is_dashboard() => Page::ChooseService,
            (page, NavAction::Logout) if page.is_dashboard() || page == Page::ChooseService => {
                self.platform = None;
                Page::LoggedOut
            }
            (page, action) if page.is_dashboard() => {
                let platform = self.platform.ok_or_else(|| {
                    AppError::BadRequest("Choose a service first".to_string())
                })?;
                match action {
                    NavAction::Compose => Page::ComposeDashboard { platform },
                    NavAction::Groups => Page::Groups,
                    NavAction::CsvManagement => Page::CsvManagement,
                    NavAction::Templates => Page::Templates,
                    NavAction::MailList { status } => Page::MailList { platform, status },
                    other => return Err(invalid(page, other)),
                }
            }
            (page, action) => return Err(invalid(page, action)),
        };

        self.page = next;
        Ok(next)
    }
}

fn invalid(page: Page, action: NavAction) -> AppError {
    AppError::BadRequest(format!("Action {:?} is not available from {:?}", action, page))
}
