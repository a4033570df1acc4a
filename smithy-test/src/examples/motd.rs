/// The "message of the day" example model used throughout the Smithy docs,
/// as IDL 2.0 text.
pub const MESSAGE_OF_THE_DAY_IDL: &str = r#"
$version: "2.0"

namespace example.motd

@documentation("Provides a Message of the day.")
service MessageOfTheDay {
    version: "2020-06-21"
    resources: [Message]
}

resource Message {
    identifiers: { date: Date }
    read: GetMessage
}

@pattern("^\\d\\d\\d\\d\\-\\d\\d-\\d\\d$")
string Date

@readonly
operation GetMessage {
    input: GetMessageInput
    output: GetMessageOutput
    errors: [BadDateValue]
}

structure GetMessageInput {
    date: Date
}

structure GetMessageOutput {
    @required
    message: String
}

@error("client")
structure BadDateValue {
    @required
    errorMessage: String
}
"#;
