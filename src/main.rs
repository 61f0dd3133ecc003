fn main() {
    medmind_lib::run()
}
