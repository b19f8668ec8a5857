fn main() {
    surfview::run();
}
