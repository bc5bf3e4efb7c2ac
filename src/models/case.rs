use std::fmt::Debug;

/// Read view of an openable case.
pub trait Case: Send + Sync + Debug {
    /// Unique identifier of the case.
    fn case_id(&self) -> &str;

    fn display_name(&self) -> &str;

    /// Base64 serialized item stack used to display the case in game.
    fn item_stack_base64(&self) -> &str;

    /// Jewelry price set when the case was created.
    fn price(&self) -> u32;

    /// Whether the case item is rendered with the glowing effect.
    fn is_with_glowing(&self) -> bool;

    /// Permission a player needs to interact with the case.
    fn permission(&self) -> &str;
}

/// Case definition built from a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseDefinition {
    pub id: String,
    pub display_name: String,
    /// Base64 item stack, carried opaquely
    pub item_stack_base64: String,
    pub price: u32,
    pub glowing: bool,
    pub permission: String,
}

impl Case for CaseDefinition {
    fn case_id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.display_name
    }

    fn item_stack_base64(&self) -> &str {
        &self.item_stack_base64
    }

    fn price(&self) -> u32 {
        self.price
    }

    fn is_with_glowing(&self) -> bool {
        self.glowing
    }

    fn permission(&self) -> &str {
        &self.permission
    }
}
