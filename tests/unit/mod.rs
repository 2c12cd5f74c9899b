mod data_file;
mod sidebar_rendering;
