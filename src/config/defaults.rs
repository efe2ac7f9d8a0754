pub fn default_version() -> u32 {
    1
}

pub fn default_title() -> String {
    "Career Ladder".to_string()
}

pub fn default_canvas_width() -> f64 {
    960.0
}

pub fn default_min_width() -> f64 {
    740.0
}

pub fn default_max_width() -> f64 {
    1060.0
}

pub fn default_fullscreen_margin_x() -> f64 {
    80.0
}

pub fn default_fullscreen_margin_y() -> f64 {
    120.0
}

pub fn default_chart_height() -> f64 {
    580.0
}

pub fn default_fullscreen_min_height() -> f64 {
    500.0
}

pub fn default_spine_ratio() -> f64 {
    0.28
}

pub fn default_branch_spacing() -> f64 {
    55.0
}

pub fn default_icon() -> String {
    "◆".to_string()
}

pub fn default_overlay_icon() -> String {
    "★".to_string()
}
