mod address;
mod width;

pub use address::{CellReference, cell_reference, column_index, column_name, split_cell_reference};
pub use width::{
    AUTO_SIZE_PADDING_PIXELS, character_width_to_256_width, display_width,
    pixel_to_character_width,
};
