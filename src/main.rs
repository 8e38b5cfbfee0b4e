fn main() {
    shooting_gallery::game::run();
}
