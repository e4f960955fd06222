use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Master macro declaring the control kind enumeration together with its
/// constant list, string conversions, and parsing.
macro_rules! declare_control_types {
    ( $( $variant:ident ),* $(,)? ) => {
        /// The fixed set of control kinds the engine recognizes.
        ///
        /// This enumeration is a static declaration consumed by both the
        /// prompt builder (to tell the model which kinds it may emit) and the
        /// validator (to reject everything else).
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum ControlType {
            $( $variant, )*
        }

        impl ControlType {
            /// Every recognized control kind, in declaration order.
            pub const ALL: &'static [ControlType] = &[ $( ControlType::$variant, )* ];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $( ControlType::$variant => stringify!($variant), )*
                }
            }
        }

        impl FromStr for ControlType {
            type Err = UnknownControlType;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( stringify!($variant) => Ok(ControlType::$variant), )*
                    other => Err(UnknownControlType(other.to_string())),
                }
            }
        }
    };
}

declare_control_types! {
    Button,
    Grid,
    TextBox,
    Dropdown,
    StackPanel,
    TextBlock,
    ToggleButton,
    CheckBox,
    CheckBoxGroup,
    Radio,
    RadioGroup,
    Form,
    FormViewer,
    Icon,
    Hyperlink,
    Tab,
    TableViewer,
    DatePicker,
    InputMask,
    Image,
    Password,
    TextArea,
    Rating,
    Webviewer,
    ValidationPlaceholder,
    AutoCompleteTextbox,
    FileUpload,
    Repeater,
    Header,
    Canvas,
    RichTextBox,
    RichText,
    HtmlViewer,
    ConditionalViewer,
    Label,
    FormRouter,
    Chips,
    DataGrid,
}

impl ControlType {
    /// Whether this kind may act as the document root.
    pub fn is_root_kind(&self) -> bool {
        matches!(self, ControlType::Form | ControlType::FormViewer)
    }
}

impl fmt::Display for ControlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a `type` string is not in the recognized enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownControlType(pub String);

impl fmt::Display for UnknownControlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized control type '{}'", self.0)
    }
}
