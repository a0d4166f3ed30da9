use arch_bot_commons::*;

fn main() {
    start_everything(
        "WARN,homework_status_bot=debug",
        homework_status_bot::entry(),
    );
}
