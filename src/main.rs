#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

fn main() {
    msmp_launcher::app_runtime::run();
}
