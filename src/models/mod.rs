pub mod contact_list;
pub mod group;
pub mod mail;
pub mod template;
pub mod user;

pub use contact_list::{ContactList, UpdateContactListRequest};
pub use group::{CreateGroupRequest, Group, GroupQuery, UpdateGroupRequest};
pub use mail::{MailLogEntry, MailQuery, MailStatus, PlatformQuery, SendMailRequest};
pub use template::{SaveTemplateRequest, Template};
pub use user::{AuthRequest, Claims, LoginResponse, User};
