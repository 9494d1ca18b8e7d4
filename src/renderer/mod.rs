pub(crate) mod colours;
pub(crate) mod drawing;
pub mod fonts;
pub(crate) mod widgets;
