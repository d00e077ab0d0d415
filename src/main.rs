fn main() {
    shield_vote::app::cli::run();
}
