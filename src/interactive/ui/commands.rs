use crate::interactive::domain::models::SearchRequest;

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    None,
    ScheduleSearch(u64), // delay in milliseconds
    CancelScheduledSearch,
    ExecuteSearch(SearchRequest),
    SaveSidebarCollapsed(bool),
    ScheduleClearMessage(u64), // delay in milliseconds
    Batch(Vec<Command>),
}

impl Command {
    /// Combines two commands, dropping `None`s.
    pub fn and(self, other: Command) -> Command {
        match (self, other) {
            (Command::None, c) | (c, Command::None) => c,
            (Command::Batch(mut a), Command::Batch(b)) => {
                a.extend(b);
                Command::Batch(a)
            }
            (Command::Batch(mut a), c) => {
                a.push(c);
                Command::Batch(a)
            }
            (a, b) => Command::Batch(vec![a, b]),
        }
    }
}
