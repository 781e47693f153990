use apiping::error::AppResult;

fn main() -> AppResult<()> {
    apiping::entry::run()
}
