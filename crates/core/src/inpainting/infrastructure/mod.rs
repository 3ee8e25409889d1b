pub mod telea_inpainter;
