pub mod error;
pub mod menu_item;
pub mod preference;
pub mod rule;
pub mod session;

pub use error::ParseError;
pub use menu_item::{parse_tags, validation, DurationBucket, MenuItem, MenuItemPatch, Mode};
pub use preference::{Blocklists, Caps, Ordering, Preference, WidgetConfig};
pub use rule::{ConditionValue, Rule, RuleAction, RuleTrigger};
pub use session::{Device, Session, SessionOutcome};
