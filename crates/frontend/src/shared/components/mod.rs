pub mod entity_select;
pub mod pagination_controls;
pub mod stat_card;
pub mod status_badge;
