fn main() {
    // Emits ESP-IDF link/include flags when building for the espidf
    // target; a no-op on host targets.
    embuild::espidf::sysenv::output();
}
