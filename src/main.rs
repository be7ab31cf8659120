use wildfire_replay::error::AppResult;

fn main() -> AppResult<()> {
    wildfire_replay::entry::run()
}
