pub mod detection {
    pub mod domain {
        pub mod face_box;
        pub mod landmark_layout;
        pub mod landmark_provider;
        pub mod landmark_set;
    }
    pub mod infrastructure;
}

pub mod imaging {
    pub mod infrastructure {
        pub mod data_url_decoder;
    }
}

pub mod leaderboard {
    pub mod domain {
        pub mod leaderboard;
        pub mod leaderboard_entry;
    }
}

pub mod pipeline {
    pub mod analyze_frame_use_case;
}

pub mod scoring {
    pub mod domain {
        pub mod calibration;
        pub mod smile_score;
        pub mod smile_scorer;
    }
}

pub mod shared {
    pub mod constants;
    pub mod frame;
    pub mod geometry;
}
