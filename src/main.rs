fn main() {
    kmodguard::run_cli();
}
