//! Errors of this crate. Predicates never fail, only loading and
//! converting data does.

error_chain! {
    foreign_links {
        Io(::std::io::Error);
        Json(::serde_json::Error);
    }

    errors {
        /// A raw frame buffer does not match the announced resolution.
        FrameSize(expected: usize, actual: usize) {
            description("frame buffer has an unexpected size")
            display("Frame buffer holds {} elements, but {} are needed", actual, expected)
        }
        /// A joint name that is not one of the 20 tracked landmarks.
        InvalidJoint(name: String) {
            description("unknown joint name")
            display("Unknown joint name: {}", name)
        }
    }
}
