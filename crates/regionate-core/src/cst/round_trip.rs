//! Round-trip tests: parsing must be byte-exact for any input

use super::parse_source;

fn assert_round_trip(source: &str) {
    let (root, _) = parse_source(source);
    assert_eq!(root.text().to_string(), source, "round-trip mismatch");
}

#[test]
fn test_round_trip_empty() {
    assert_round_trip("");
}

#[test]
fn test_round_trip_only_trivia() {
    assert_round_trip("\n\n// just a comment\n\n");
}

#[test]
fn test_round_trip_full_file() {
    assert_round_trip(
        r#"using System;
using System.Collections.Generic;

namespace Acme.Widgets
{

	#region Class: Widget

	/// <summary>A widget.</summary>
	public class Widget : IDisposable
	{

		#region Fields: Private

		int _count = 0;
		string _name = "w{1}";

		#endregion

		public void Dispose() {
			// cleanup
		}

	}

	#endregion

}
"#,
    );
}

#[test]
fn test_round_trip_crlf() {
    assert_round_trip("class A\r\n{\r\n\tint _x;\r\n}\r\n");
}

#[test]
fn test_round_trip_preprocessor_and_strings() {
    assert_round_trip(
        "#if DEBUG\nclass A\n{\n\tstring s = @\"multi\nline \"\"quoted\"\"\";\n\tchar c = '}';\n}\n#endif\n",
    );
}

#[test]
fn test_round_trip_unbalanced_braces() {
    // Error-tolerant: malformed input still round-trips
    assert_round_trip("class A\n{\n\tvoid F() {\n");
    assert_round_trip("}\n}\n");
}

#[test]
fn test_round_trip_expression_bodies_and_operators() {
    assert_round_trip(
        "struct V\n{\n\tpublic int X => _x * 2;\n\tpublic static V operator +(V a, V b) => a;\n\tint _x;\n}\n",
    );
}
