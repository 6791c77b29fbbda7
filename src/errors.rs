// Create the Error, ErrorKind, ResultExt, and Result types
error_chain! {
    foreign_links {
        Io(::std::io::Error);
        Csv(::csv::Error);
        ParseInt(::std::num::ParseIntError);
        ParseFloat(::std::num::ParseFloatError);
    }

    errors {
        InvalidAlphabet(nuc: u8, pos: usize) {
            description("invalid nucleotide in sequence")
            display("invalid nucleotide {:?} at position {}", *nuc as char, pos)
        }

        EmptyInput(path: String) {
            description("no reads passed the length filter")
            display("no reads in {:?} passed the length filter", path)
        }

        MalformedReference(msg: String) {
            description("malformed reference FASTA")
            display("malformed reference FASTA: {}", msg)
        }

        Configuration(msg: String) {
            description("invalid configuration")
            display("invalid configuration: {}", msg)
        }

        InvalidGuide(guide: String) {
            description("invalid guide sequence")
            display("invalid guide sequence {:?}", guide)
        }

        MalformedTable(msg: String) {
            description("malformed result table")
            display("malformed result table: {}", msg)
        }
    }
}
