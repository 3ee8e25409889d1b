//! Motion-removal frame cleaner.
//!
//! Decodes videos frame by frame, masks what moved, inpaints the masked
//! pixels from the static surroundings and writes raw and cleaned PNGs.

pub mod blending {
    pub mod domain {
        pub mod edge_blender;
    }
    pub mod infrastructure;
}

pub mod imaging {
    pub mod contours;
    pub mod gaussian;
    pub mod mat;
    pub mod morphology;
    pub mod pixel_ops;
}

pub mod inpainting {
    pub mod domain {
        pub mod inpainter;
    }
    pub mod infrastructure;
}

pub mod motion {
    pub mod domain {
        pub mod background_model;
        pub mod motion_mask_builder;
    }
    pub mod infrastructure;
}

pub mod output {
    pub mod domain {
        pub mod frame_layout;
    }
    pub mod infrastructure;
}

pub mod pipeline {
    pub mod clean_batch_use_case;
    pub mod clean_video_use_case;
    pub mod frame_session;
    pub mod pipeline_logger;
    pub mod video_discovery;
}

pub mod shared {
    pub mod config;
    pub mod constants;
    pub mod frame;
    pub mod plane;
    pub mod region;
    pub mod stream_info;
}

pub mod video {
    pub mod domain {
        pub mod image_writer;
        pub mod video_reader;
    }
    pub mod infrastructure;
}
