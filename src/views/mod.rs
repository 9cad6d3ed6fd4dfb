pub mod app;
pub mod header;
pub mod filters;
pub mod package_card;
pub mod package_list;
pub mod register_form;
pub mod action_sheet;
pub mod scanner;
pub mod toast;

pub use app::render_app;
pub use package_card::render_package_card;
pub use package_list::render_package_list;

use crate::state::app_state::UpdateType;

/// Aplicar la actualización devuelta por el ViewModel (None = nada que pintar)
pub fn apply_update(update: Option<UpdateType>) {
    if let Some(update) = update {
        crate::rerender_app_with_type(update);
    }
}
