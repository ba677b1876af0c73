mod conf;
mod create;
mod ctl;
mod delete;
mod init;
mod list;
mod logs;
mod new;
mod psql;
mod setup;
mod step;
mod switch;

pub use conf::cmd_conf;
pub use create::cmd_create;
pub use ctl::{cmd_restart, cmd_start, cmd_status, cmd_stop};
pub use delete::cmd_delete;
pub use init::cmd_init;
pub use list::cmd_list;
pub use logs::cmd_logs;
pub use new::cmd_new;
pub use psql::cmd_psql;
pub use setup::cmd_setup;
pub use step::cmd_step;
pub use switch::{cmd_default, cmd_switch};
