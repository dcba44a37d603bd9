fn main() {
    let return_code = img_retrieval::run_app();
    std::process::exit(return_code)
}
